use std::future::Future;

use color_eyre::eyre::Result;

use super::identity::Identity;

/// Password handed to the wallet when provisioning identities from the account list.
pub const DEFAULT_PASSWORD: &str = "password";

/// The wallet collaborator the UI components talk to.
///
/// Identities are ordered and append-only from the caller's point of view.
pub trait Wallet {
    fn identities(&self) -> &[Identity];

    /// Create and append a new identity.
    fn create_new_identity(&mut self, password: &str) -> impl Future<Output = Result<Identity>>;

    fn sign_out(&mut self) -> Result<()>;

    fn lock_wallet(&mut self) -> Result<()>;
}
