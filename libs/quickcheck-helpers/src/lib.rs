// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

/// This module provides helper functions that generate pseudorandom
/// resource keys.
pub mod random {
    use quickcheck::{Arbitrary, Gen};

    /// Characters that are awkward in a URL path segment and therefore show
    /// up in the natural keys the id codec has to survive.
    const AWKWARD: &[char] = &['/', ' ', '?', '#', '%', '+', '=', ':', 'é', 'ß', '字', '🦀'];

    /// Generate a random volume-name-like [`String`] of `len` characters.
    ///
    /// Roughly a quarter of the characters are drawn from a set of path
    /// hostile and non-ASCII characters, the rest are lowercase
    /// alphanumerics and dashes.
    pub fn natural_key(g: &mut Gen, len: usize) -> String {
        (0..len)
            .map(|_| {
                let c = u8::arbitrary(g);
                match c % 48 {
                    n @ 0..=25 => (b'a' + n) as char,
                    n @ 26..=35 => (b'0' + (n - 26)) as char,
                    36 => '-',
                    _ => g.choose(AWKWARD).copied().unwrap_or('/'),
                }
            })
            .collect()
    }

    /// Generate a random replica address such as `tcp://10.1.2.3:9502`.
    pub fn address(g: &mut Gen) -> String {
        let scheme = g.choose(&["tcp", "http"]).copied().unwrap_or("tcp");
        let octets: Vec<String> = (0..4).map(|_| u8::arbitrary(g).to_string()).collect();
        let port = u16::arbitrary(g);
        format!("{}://{}:{}", scheme, octets.join("."), port)
    }
}

#[cfg(test)]
mod tests {
    use super::random;
    use quickcheck::Gen;

    #[test]
    fn natural_key_has_requested_length() {
        let mut g = Gen::new(16);
        for len in [0, 1, 17, 64] {
            assert_eq!(random::natural_key(&mut g, len).chars().count(), len);
        }
    }

    #[test]
    fn address_has_scheme_and_port() {
        let mut g = Gen::new(16);
        let address = random::address(&mut g);
        assert!(address.contains("://"));
        assert_eq!(address.rsplit(':').count(), 3);
    }
}
