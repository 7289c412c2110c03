//! Random names and POSIX ids for test objects.

use rand::Rng;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Default length of [`random_name`] results.
pub const DEFAULT_NAME_LEN: usize = 8;

/// Id range for [`XidRegistry`], well above ids a test host assigns itself.
pub const XID_RANGE: RangeInclusive<u32> = 4_711_000..=4_799_000;

/// Attempts before [`XidRegistry::next_xid`] gives up.
pub const XID_ATTEMPTS: usize = 50;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Returns a random name of `count` characters.
///
/// The first character is an uppercase ASCII letter, the rest are ASCII
/// letters or digits. Names are not guaranteed unique.
pub fn random_name(count: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let alphabet = if i == 0 { UPPER } else { ALNUM };
            char::from(alphabet[rng.gen_range(0..alphabet.len())])
        })
        .collect()
}

/// Ids already handed out by one harness instance.
#[derive(Debug, Clone)]
pub struct XidRegistry {
    range: RangeInclusive<u32>,
    used: HashSet<u32>,
}

impl Default for XidRegistry {
    fn default() -> Self {
        Self::with_range(XID_RANGE)
    }
}

impl XidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_range(range: RangeInclusive<u32>) -> Self {
        Self {
            range,
            used: HashSet::new(),
        }
    }

    /// Returns an id not previously returned by this registry.
    ///
    /// # Panics
    ///
    /// Panics with `No Xid are available` if every attempt hits a used id.
    pub fn next_xid(&mut self) -> u32 {
        let mut rng = rand::thread_rng();
        for _ in 0..XID_ATTEMPTS {
            let xid = rng.gen_range(self.range.clone());
            if self.used.insert(xid) {
                return xid;
            }
        }
        panic!("No Xid are available");
    }

    /// Returns true if `xid` has been handed out.
    pub fn contains(&self, xid: u32) -> bool {
        self.used.contains(&xid)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
