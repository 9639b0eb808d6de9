//! Deterministic fingerprints for artifacts.
//!
//! Fingerprints identify which artifact a process loaded in logs and on the
//! status panel. They are not integrity checks.

/// 32-bit FNV-1a hash state.
#[derive(Copy, Clone, Debug)]
pub struct Fingerprint(u32);

impl Fingerprint {
    /// Create a new hash state with the FNV offset basis.
    pub fn new() -> Self {
        Self(2_166_136_261)
    }

    /// Hash a whole buffer in one go.
    pub fn of(bytes: &[u8]) -> Self {
        let mut fp = Self::new();
        fp.update(bytes);
        fp
    }

    /// Feed bytes into the hash function.
    pub fn update(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = (self.0 ^ u32::from(*b)).wrapping_mul(16_777_619);
        }
    }

    pub fn finish32(&self) -> u32 {
        self.0
    }

    /// Finalise the hash and return an 8-character lowercase hex string.
    pub fn finish_hex(&self) -> String {
        format!("{:08x}", self.0)
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_vectors() {
        assert_eq!(Fingerprint::of(b"").finish32(), 0x811c_9dc5);
        assert_eq!(Fingerprint::of(b"a").finish_hex(), "e40c292c");
    }

    #[test]
    fn incremental_equals_one_shot() {
        let mut fp = Fingerprint::new();
        fp.update(b"age_");
        fp.update(b"old");
        assert_eq!(fp.finish32(), Fingerprint::of(b"age_old").finish32());
    }
}
