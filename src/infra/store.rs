use std::path::PathBuf;

use color_eyre::eyre::Result;
use heed::{Database, Env, EnvOpenOptions, byteorder::BE, types::*};
use serde::{Deserialize, Serialize};

use crate::{config::get_data_dir, infra::keychain::StoredIdentity};

const IDENTITIES_DB: &str = "identities";
const METADATA_DB: &str = "metadata";

/// Wrapper around LMDB database for persistent storage.
#[derive(Clone)]
pub struct Store {
    env: Env,
}

impl Store {
    pub fn new() -> Result<Self> {
        Self::with_path(get_data_dir().join("wallet.mdb"))
    }

    pub fn with_path(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(16 * 1024 * 1024) // 16MB
                .max_dbs(4)
                .open(path)?
        };
        Ok(Self { env })
    }

    /// Save an identity, keyed by its index.
    pub fn save_identity(&self, identity: &StoredIdentity) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<U64<BE>, SerdeRmp<StoredIdentity>> =
            self.env.create_database(&mut wtxn, Some(IDENTITIES_DB))?;
        db.put(&mut wtxn, &identity.index, identity)?;
        wtxn.commit()?;
        Ok(())
    }

    /// List all identities in index order.
    pub fn list_identities(&self) -> Result<Vec<StoredIdentity>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<U64<BE>, SerdeRmp<StoredIdentity>>> =
            self.env.open_database(&rtxn, Some(IDENTITIES_DB))?;

        match db {
            Some(db) => {
                let mut identities = Vec::new();
                for result in db.iter(&rtxn)? {
                    let (_, identity) = result?;
                    identities.push(identity);
                }
                Ok(identities)
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn save_metadata<T: Serialize + 'static>(&self, key: &str, value: &T) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<Str, SerdeRmp<T>> =
            self.env.create_database(&mut wtxn, Some(METADATA_DB))?;
        db.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }

    pub fn load_metadata<T: for<'de> Deserialize<'de> + 'static>(
        &self,
        key: &str,
    ) -> Result<Option<T>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<Str, SerdeRmp<T>>> =
            self.env.open_database(&rtxn, Some(METADATA_DB))?;

        match db {
            Some(db) => Ok(db.get(&rtxn, key)?),
            None => Ok(None),
        }
    }

    /// Drop every identity and metadata entry.
    pub fn clear(&self) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let identities: Database<U64<BE>, SerdeRmp<StoredIdentity>> =
            self.env.create_database(&mut wtxn, Some(IDENTITIES_DB))?;
        identities.clear(&mut wtxn)?;
        let metadata: Database<Str, Bytes> =
            self.env.create_database(&mut wtxn, Some(METADATA_DB))?;
        metadata.clear(&mut wtxn)?;
        wtxn.commit()?;
        Ok(())
    }
}
