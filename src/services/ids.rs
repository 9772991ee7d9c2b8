//! Book identifier generation

use rand::Rng;

/// URL-safe alphabet, 64 symbols
const ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Source of fresh book identifiers
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random URL-safe tokens of a fixed length
#[derive(Debug, Clone)]
pub struct NanoIdGenerator {
    length: usize,
}

impl NanoIdGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl IdGenerator for NanoIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
