use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait implemented by credentials the signer accepts.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential carries usable secret material.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential loads a credential from wherever the caller keeps it.
///
/// Returning `Ok(None)` means "not found here", which lets providers be
/// chained; errors are reserved for sources that exist but are broken.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load credential from current context.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}
