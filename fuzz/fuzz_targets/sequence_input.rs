#![no_main]

use libfuzzer_sys::fuzz_target;
use tracefold::automaton::Automaton;
use tracefold::step::{parse_sequence_lines, parse_sequences};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any input must either be rejected or fold without panicking
        let parsed = parse_sequences(input).or_else(|_| parse_sequence_lines(input));
        if let Ok(sequences) = parsed {
            let mut looped = Automaton::new(true);
            let _ = looped.insert(&sequences);
            let _ = looped.render(true);

            let mut discrete = Automaton::new(false);
            let _ = discrete.insert(&sequences);
        }
    }
});
