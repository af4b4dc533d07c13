//! Profile storage as seen by the core.
//!
//! The firmware keeps four profiles, slot 0 for USB and slots 1..=3 for BLE
//! hosts. The core only reads settings and writes one back when the user cycles
//! it on the Fn layer; persisting the page is left to the caller.

use core::fmt;

use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::config::{ProfileKey, ProfileSettings};
use crate::{PROFILE_COUNT, PROFILE_DATA_SIZE, PROFILE_VERSION};

/// Settings storage consumed by the keyboard core
pub trait ProfileStore {
    /// Read one setting of the active profile
    fn read(&self, key: ProfileKey) -> u8;

    /// Update one setting of the active profile
    fn write(&mut self, key: ProfileKey, value: u8);

    /// Index of the active profile
    fn current(&self) -> u8;

    /// Switch to another profile, out of range indices are ignored
    fn select(&mut self, index: u8);

    /// Profile 0 is bound to the USB connection
    fn is_usb_mode(&self) -> bool {
        self.current() == 0
    }

    /// Decoded settings of the active profile
    fn settings(&self) -> ProfileSettings {
        ProfileSettings::from_store(self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileError {
    /// The output buffer cannot hold the page
    Encode,
    /// The stored bytes are not a profile page
    Decode,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Encode => write!(f, "profile page does not fit the buffer"),
            ProfileError::Decode => write!(f, "stored bytes are not a profile page"),
        }
    }
}

/// In-memory copy of the persisted profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfilePage {
    version: u8,
    current: u8,
    data: [[u8; PROFILE_DATA_SIZE]; PROFILE_COUNT],
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilePage {
    /// A page with every slot set to the default settings and profile 0 active
    pub fn new() -> Self {
        Self {
            version: PROFILE_VERSION,
            current: 0,
            data: [ProfileSettings::default().to_bytes(); PROFILE_COUNT],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.version == PROFILE_VERSION && (self.current as usize) < PROFILE_COUNT
    }

    /// Decode a stored page.
    ///
    /// A page that decodes but fails validation is replaced by a fresh one.
    pub fn load(bytes: &[u8]) -> Result<Self, ProfileError> {
        let page: ProfilePage = postcard::from_bytes(bytes).map_err(|_e| {
            error!("Failed to decode profile page");
            ProfileError::Decode
        })?;
        if page.is_valid() {
            Ok(page)
        } else {
            warn!("Profile page version {} is not supported, resetting", page.version);
            Ok(Self::new())
        }
    }

    /// Decode a stored page, falling back to a fresh one on any error
    pub fn load_or_default(bytes: &[u8]) -> Self {
        Self::load(bytes).unwrap_or_default()
    }

    /// Encode the page into `buf`, returning the used part
    pub fn store<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ProfileError> {
        postcard::to_slice(self, buf).map_err(|_e| {
            error!("Failed to encode profile page");
            ProfileError::Encode
        })
    }

    /// Raw bytes of one profile slot
    pub fn slot(&self, index: usize) -> Option<&[u8; PROFILE_DATA_SIZE]> {
        self.data.get(index)
    }
}

impl ProfileStore for ProfilePage {
    fn read(&self, key: ProfileKey) -> u8 {
        self.data[self.current as usize][key.offset()]
    }

    fn write(&mut self, key: ProfileKey, value: u8) {
        debug!("Profile {}: setting {} = {}", self.current, key as u8, value);
        self.data[self.current as usize][key.offset()] = value;
    }

    fn current(&self) -> u8 {
        self.current
    }

    fn select(&mut self, index: u8) {
        if (index as usize) < PROFILE_COUNT {
            self.current = index;
        } else {
            warn!("Ignoring request for profile {}", index);
        }
    }
}
