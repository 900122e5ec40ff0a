//! Key-value storage of irrigation profiles, keyed by an opaque user identifier.
//!
//! The watering engine only ever reads a profile; registration goes through
//! [`register_profile`] so an invalid profile never reaches a store.

use crate::error::GardenBotError;
use crate::irrigation::error::ProfileError;
use crate::irrigation::profile::IrrigationProfile;
use crate::utils::{ensure_dir_exists, get_data_dir};
use bincode::config::{Configuration, Fixint, LittleEndian};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "irrigation_profiles.bin";
const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// Storage of one profile per user. `put` overwrites; nothing is ever deleted implicitly.
pub trait ProfileStore {
    fn get(&self, user: &str) -> Result<Option<IrrigationProfile>, ProfileError>;
    fn put(&mut self, user: &str, profile: IrrigationProfile) -> Result<(), ProfileError>;
}

/// Validates a site's area and flow rate and stores the result for `user`,
/// replacing any earlier registration.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidProfile`] without touching the store if either value
/// is not positive, or the store's own error if writing fails.
pub fn register_profile<S: ProfileStore + ?Sized>(
    store: &mut S,
    user: &str,
    area_sqft: f64,
    flow_rate_gpm: f64,
) -> Result<IrrigationProfile, ProfileError> {
    let profile = IrrigationProfile::new(area_sqft, flow_rate_gpm)?;
    store.put(user, profile)?;
    info!("Registered irrigation profile for user {}", user);
    Ok(profile)
}

/// Profiles kept in memory for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryProfileStore {
    profiles: HashMap<String, IrrigationProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, user: &str) -> Result<Option<IrrigationProfile>, ProfileError> {
        Ok(self.profiles.get(user).copied())
    }

    fn put(&mut self, user: &str, profile: IrrigationProfile) -> Result<(), ProfileError> {
        self.profiles.insert(user.to_string(), profile);
        Ok(())
    }
}

/// Profiles persisted to a single bincode file, rewritten on every `put`.
#[derive(Debug)]
pub struct FileProfileStore {
    path: PathBuf,
    profiles: HashMap<String, IrrigationProfile>,
}

impl FileProfileStore {
    /// Opens the store file inside `dir`, creating the directory if needed. A missing
    /// file is an empty store.
    pub fn open(dir: &Path) -> Result<Self, ProfileError> {
        ensure_dir_exists(dir).map_err(|e| ProfileError::StoreDirCreation(dir.to_path_buf(), e))?;
        let path = dir.join(STORE_FILE_NAME);

        let profiles = if path.exists() {
            let bytes =
                std::fs::read(&path).map_err(|e| ProfileError::StoreRead(path.clone(), e))?;
            let (decoded, _) = bincode::serde::decode_from_slice::<
                HashMap<String, IrrigationProfile>,
                _,
            >(&bytes, BINCODE_CONFIG)
            .map_err(|e| ProfileError::StoreDecode(path.clone(), Box::new(e)))?;
            debug!("Loaded {} irrigation profiles from {}", decoded.len(), path.display());
            decoded
        } else {
            HashMap::new()
        };

        Ok(Self { path, profiles })
    }

    /// Opens the store in the per-user data directory (`~/.local/share/gardenbot` on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`GardenBotError::DataDirResolution`] if the platform has no data
    /// directory, or a wrapped [`ProfileError`] if the store cannot be opened.
    pub fn open_default() -> Result<Self, GardenBotError> {
        let dir = get_data_dir().ok_or(GardenBotError::DataDirResolution)?;
        Ok(Self::open(&dir)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn persist(&self) -> Result<(), ProfileError> {
        let bytes = bincode::serde::encode_to_vec(&self.profiles, BINCODE_CONFIG)
            .map_err(|e| ProfileError::StoreEncode(Box::new(e)))?;
        // Write next to the target and rename, so a crash never leaves a torn file
        let staging = self.path.with_extension("bin.tmp");
        std::fs::write(&staging, &bytes)
            .map_err(|e| ProfileError::StoreWrite(staging.clone(), e))?;
        std::fs::rename(&staging, &self.path)
            .map_err(|e| ProfileError::StoreWrite(self.path.clone(), e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self, user: &str) -> Result<Option<IrrigationProfile>, ProfileError> {
        Ok(self.profiles.get(user).copied())
    }

    fn put(&mut self, user: &str, profile: IrrigationProfile) -> Result<(), ProfileError> {
        let previous = self.profiles.insert(user.to_string(), profile);
        if let Err(e) = self.persist() {
            // Keep memory in step with what is on disk
            match previous {
                Some(p) => self.profiles.insert(user.to_string(), p),
                None => self.profiles.remove(user),
            };
            return Err(e);
        }
        Ok(())
    }
}
