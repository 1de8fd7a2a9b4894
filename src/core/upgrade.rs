use ethers::types::Address;

use crate::access::Role;
use crate::core::{SwapRouter, TaxToken};
use crate::models::TokenEvent;
use crate::utils::{Result, TokenError};

impl<R: SwapRouter> TaxToken<R> {
    pub fn implementation(&self) -> Address {
        self.state.proxy.implementation
    }

    pub fn version(&self) -> u64 {
        self.state.proxy.version
    }

    /// UUPS `_authorizeUpgrade`: point the proxy at `new_implementation`.
    ///
    /// Storage is untouched; returns the new version number.
    pub fn authorize_upgrade(&mut self, caller: Address, new_implementation: Address) -> Result<u64> {
        self.atomically(|t| {
            t.require_role(Role::Upgrader, caller)?;
            if new_implementation.is_zero() {
                return Err(TokenError::ZeroAddress("implementation"));
            }
            t.state.proxy.implementation = new_implementation;
            t.state.proxy.version += 1;
            let version = t.state.proxy.version;
            tracing::info!("⬆️  Upgraded to {:?} (v{})", new_implementation, version);
            t.emit(TokenEvent::Upgraded { implementation: new_implementation, version });
            Ok(version)
        })
    }
}
