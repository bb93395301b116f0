//! Client factory resolving the active chain selection.
//!
//! Looks up the selected chain id in the settings store, matches it against
//! the static catalogue, and constructs a client bound to that network and to
//! the operator account. A stored id that no longer matches the catalogue is
//! cleared so a stale selection cannot wedge every subsequent run.

use crate::{ClientError, EvmClient};
use streams_account::OperatorAccount;
use streams_store::SettingsStore;
use streams_types::chains;

/// Resolves a client for the currently selected chain.
///
/// Fails with [`ClientError::NoChainSelected`] when nothing is selected and
/// with [`ClientError::UnknownChain`] — after clearing the selection — when
/// the stored id is not in the catalogue.
pub async fn resolve_client(
	store: &SettingsStore,
	account: &OperatorAccount,
) -> Result<EvmClient, ClientError> {
	let chain_id = store
		.get_chain_id()
		.await?
		.ok_or(ClientError::NoChainSelected)?;

	let Some(chain) = chains::by_id(chain_id) else {
		tracing::warn!(chain_id, "Selected chain is not supported; clearing selection");
		store.clear_chain_id().await?;
		return Err(ClientError::UnknownChain(chain_id));
	};

	let signer = account.signer().ok().cloned();
	EvmClient::connect(chain.clone(), signer)
}
