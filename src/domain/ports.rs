use crate::domain::enums::EntityKind;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn entity_kind(&self) -> &str;
    fn report_path(&self) -> Option<&str>;
}

/// Answers whether an identifier exists. Backed by whatever store owns the
/// records; an `Err` means the lookup could not be performed at all.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool>;
}
