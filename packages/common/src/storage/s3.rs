use std::io::Cursor;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tokio::io::AsyncReadExt;

use super::{BlobStore, BoxReader, ContentHash, StorageError};

/// S3-compatible blob store for the hosted object bucket.
///
/// Objects are keyed `{prefix}/{first 2 hex chars}/{remaining 62 hex
/// chars}`, matching the filesystem backend's shard layout so the two
/// are interchangeable behind [`BlobStore`].
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    prefix: String,
    max_size: u64,
}

impl S3BlobStore {
    /// Connect to a bucket. `endpoint` is the custom region endpoint of
    /// the hosting provider; credentials come from explicit keys.
    pub fn new(
        bucket_name: &str,
        region: &str,
        endpoint: &str,
        access_key: &str,
        secret_key: &str,
        prefix: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: region.to_string(),
            endpoint: endpoint.to_string(),
        };
        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;
        let bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?
            .with_path_style();

        Ok(Self {
            bucket,
            prefix: prefix.trim_matches('/').to_string(),
            max_size,
        })
    }

    fn object_key(&self, hash: &ContentHash) -> String {
        if self.prefix.is_empty() {
            format!("{}/{}", hash.shard_prefix(), hash.shard_suffix())
        } else {
            format!(
                "{}/{}/{}",
                self.prefix,
                hash.shard_prefix(),
                hash.shard_suffix()
            )
        }
    }
}

fn is_not_found(err: &S3Error) -> bool {
    matches!(err, S3Error::HttpFailWithBody(404, _))
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put_stream(&self, mut reader: BoxReader) -> Result<ContentHash, StorageError> {
        // The object key is the content hash, so the stream has to be
        // drained before the upload can start. Media blobs are capped at
        // a few megabytes, buffering in memory is fine.
        let mut data = Vec::new();
        let mut buf = vec![0u8; 64 * 1024];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            if data.len() as u64 > self.max_size {
                return Err(StorageError::SizeLimitExceeded {
                    actual: data.len() as u64,
                    limit: self.max_size,
                });
            }
        }

        let hash = ContentHash::compute(&data);
        let key = self.object_key(&hash);

        if self.exists(&hash).await? {
            return Ok(hash);
        }

        self.bucket
            .put_object(&key, &data)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(hash)
    }

    async fn get_stream(&self, hash: &ContentHash) -> Result<BoxReader, StorageError> {
        let key = self.object_key(hash);
        match self.bucket.get_object(&key).await {
            Ok(response) => Ok(Box::new(Cursor::new(response.to_vec()))),
            Err(e) if is_not_found(&e) => Err(StorageError::NotFound(hash.to_hex())),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    async fn exists(&self, hash: &ContentHash) -> Result<bool, StorageError> {
        let key = self.object_key(hash);
        match self.bucket.head_object(&key).await {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    async fn delete(&self, hash: &ContentHash) -> Result<bool, StorageError> {
        if !self.exists(hash).await? {
            return Ok(false);
        }
        let key = self.object_key(hash);
        self.bucket
            .delete_object(&key)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(true)
    }
}
