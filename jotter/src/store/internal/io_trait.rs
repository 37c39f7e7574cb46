use std::path::Path;
use async_trait::async_trait;
use log::{debug, trace};
use time::OffsetDateTime;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use crate::lib_constants::STORE_READ_BUF_SIZE;
use crate::store::internal::data::StoreData;
use crate::store::StoreError;

#[async_trait]
pub(super) trait StoreIo: Send + Sync {
    async fn read_store_file(&self) -> Result<StoreData, StoreError>;

    async fn write_store_file(
        &self,
        store_data: &StoreData,
    ) -> Result<(), StoreError>;

    fn get_time(&self) -> OffsetDateTime;
}

pub struct ProductionStoreIo {
    db_file: Mutex<File>, // holds a file lock
}

impl ProductionStoreIo {
    pub fn new(
        db_file_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        let db_file_path = db_file_path.as_ref();
        if let Some(parent) = db_file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        debug!("opening database at \"{}\"", db_file_path.display());
        let std_file = std::fs::File::options()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(db_file_path)?;
        std_file.try_lock()
            .map_err(|e| StoreError::LockingFailed(e.into()))?;
        Ok(
            ProductionStoreIo {
                db_file: Mutex::new(File::from_std(std_file)),
            }
        )
    }
}

#[async_trait]
impl StoreIo for ProductionStoreIo {
    async fn read_store_file(&self) -> Result<StoreData, StoreError> {
        let mut db_file = self.db_file.lock().await;
        db_file.rewind().await?;
        let mut read_buf = String::with_capacity(STORE_READ_BUF_SIZE);
        db_file.read_to_string(&mut read_buf).await?;
        trace!("read {} bytes of database", read_buf.len());
        Ok(toml::from_str(&read_buf)?)
    }

    async fn write_store_file(
        &self,
        store_data: &StoreData,
    ) -> Result<(), StoreError> {
        let serialized = toml::to_string(store_data)?;
        let mut db_file = self.db_file.lock().await;
        db_file.set_len(0).await?;
        db_file.rewind().await?;
        db_file.write_all(serialized.as_bytes()).await?;
        db_file.flush().await?;
        db_file.sync_data().await?;
        Ok(())
    }

    fn get_time(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
