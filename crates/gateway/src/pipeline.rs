//! Orchestration of fetch, classify, enrich and layout.

use std::sync::Arc;

use alloy_primitives::Address;
use futures::future::join_all;
use safegate_classifier::{resolve_status, TransactionClassifier, TxFacts};
use safegate_description::{HumanDescriptionEngine, TemplateRegistry};
use safegate_primitives::{
    AddressInfo, AddressInfoKind, AddressInfoResolver, Cursor, ExecutionInfo, HistoryItem,
    HistoryRecord, IncomingTransfer, ModuleTransaction, MultisigTransaction, Page, QueueItem,
    ResolveError, SafeCreation, SafeInfo, TokenResolver, TransactionInfo, TransactionSource,
    TransactionStatus, TransactionSummary, TransferInfo, TransferKind,
};
use safegate_timeline::{group_history, group_queue, QueueContext};
use tracing::debug;

use crate::error::GatewayError;
use crate::ids;

const TOKEN_OR_CONTRACT: &[AddressInfoKind] = &[AddressInfoKind::Token, AddressInfoKind::Contract];
const CONTRACT_ONLY: &[AddressInfoKind] = &[AddressInfoKind::Contract];

/// Read-side gateway over one transaction source and its metadata resolvers.
pub struct Gateway {
    source: Arc<dyn TransactionSource>,
    addresses: Arc<dyn AddressInfoResolver>,
    tokens: Arc<dyn TokenResolver>,
    classifier: TransactionClassifier,
    descriptions: HumanDescriptionEngine,
}

impl Gateway {
    pub fn new(
        source: Arc<dyn TransactionSource>,
        addresses: Arc<dyn AddressInfoResolver>,
        tokens: Arc<dyn TokenResolver>,
    ) -> Result<Self, GatewayError> {
        let registry = TemplateRegistry::standard()?;
        Ok(Self {
            classifier: TransactionClassifier::new(addresses.clone(), tokens.clone()),
            descriptions: HumanDescriptionEngine::new(registry, tokens.clone()),
            source,
            addresses,
            tokens,
        })
    }

    /// The pending queue as a page of labels, conflict headers and summaries.
    pub async fn queued_page(
        &self,
        chain_id: u64,
        safe: Address,
        cursor: Cursor,
    ) -> Result<Page<QueueItem>, GatewayError> {
        let safe_info = self.source.safe_info(chain_id, safe).await?;

        // Over-fetch one record on each side of the window so grouping can
        // see whether the edge groups continue on the neighbouring pages.
        let lead = u64::from(cursor.offset > 0);
        let page = self
            .source
            .queued_transactions(chain_id, safe, cursor.limit + lead + 1, cursor.offset - lead)
            .await?;
        let count = page.count;
        let results = page.results;

        let lead = lead as usize;
        let limit = cursor.limit as usize;
        let trailing = (lead == 1)
            .then(|| results.first().map(|tx| tx.nonce))
            .flatten();
        let lookahead = results.get(lead + limit).map(|tx| tx.nonce);

        let window = &results[lead.min(results.len())..results.len().min(lead + limit)];
        let summaries = join_all(
            window
                .iter()
                .filter(|tx| {
                    // The slot of a lower nonce is already spent; such
                    // stragglers belong to history, not the queue.
                    let live = tx.nonce >= safe_info.nonce;
                    if !live {
                        debug!(nonce = tx.nonce, "superseded transaction in queue listing");
                    }
                    live
                })
                .map(|tx| self.multisig_summary(chain_id, &safe_info, tx)),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

        let ctx = QueueContext {
            safe_nonce: safe_info.nonce,
            lookahead,
            trailing,
        };
        Ok(paged(group_queue(summaries, &ctx), count, cursor))
    }

    /// Executed transactions and incoming transfers, grouped by calendar day.
    ///
    /// `timezone_offset_ms` shifts the day boundaries; the creation record is
    /// appended once the listing is exhausted.
    pub async fn history_page(
        &self,
        chain_id: u64,
        safe: Address,
        cursor: Cursor,
        timezone_offset_ms: i64,
    ) -> Result<Page<HistoryItem>, GatewayError> {
        let safe_info = self.source.safe_info(chain_id, safe).await?;
        let page = self
            .source
            .history_transactions(chain_id, safe, cursor.limit, cursor.offset)
            .await?;
        let count = page.count;

        let summaries = join_all(
            page.results
                .iter()
                .map(|record| self.record_summaries(chain_id, &safe_info, record)),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<Vec<_>>, _>>()?;
        let mut summaries: Vec<_> = summaries.into_iter().flatten().collect();

        if cursor.next(count).is_none() {
            match self.source.creation(chain_id, safe).await {
                Ok(creation) => {
                    summaries.push(self.creation_summary(chain_id, safe, &creation).await)
                }
                Err(ResolveError::NotFound) => debug!(%safe, "no creation record"),
                Err(err) => return Err(err.into()),
            }
        }

        Ok(paged(
            group_history(summaries, timezone_offset_ms),
            count,
            cursor,
        ))
    }

    async fn record_summaries(
        &self,
        chain_id: u64,
        safe_info: &SafeInfo,
        record: &HistoryRecord,
    ) -> Result<Vec<TransactionSummary>, GatewayError> {
        match record {
            HistoryRecord::Multisig(tx) => {
                Ok(vec![self.multisig_summary(chain_id, safe_info, tx).await?])
            }
            HistoryRecord::Module(tx) => Ok(vec![self.module_summary(chain_id, tx).await?]),
            HistoryRecord::Ethereum(tx) => Ok(join_all(
                tx.transfers
                    .iter()
                    .map(|transfer| self.transfer_summary(chain_id, safe_info.address, transfer)),
            )
            .await),
        }
    }

    async fn multisig_summary(
        &self,
        chain_id: u64,
        safe_info: &SafeInfo,
        tx: &MultisigTransaction,
    ) -> Result<TransactionSummary, GatewayError> {
        let facts = TxFacts::from_multisig(chain_id, tx);
        let mut tx_info = self.classifier.classify(&facts).await?;
        if let Some(data) = tx.data.as_ref() {
            tx_info.set_human_description(self.descriptions.describe(chain_id, tx.to, data).await);
        }

        let (tx_status, missing) = resolve_status(tx, safe_info);
        Ok(TransactionSummary {
            id: ids::multisig_id(tx.safe, tx.safe_tx_hash),
            timestamp: tx.timestamp_ms(),
            tx_status,
            tx_info,
            execution_info: Some(ExecutionInfo::Multisig {
                nonce: tx.nonce,
                confirmations_required: tx.confirmations_required,
                confirmations_submitted: tx.confirmations.len() as u64,
                missing_signers: missing
                    .map(|signers| signers.into_iter().map(AddressInfo::bare).collect()),
            }),
        })
    }

    async fn module_summary(
        &self,
        chain_id: u64,
        tx: &ModuleTransaction,
    ) -> Result<TransactionSummary, GatewayError> {
        let facts = TxFacts::from_module(chain_id, tx);
        let mut tx_info = self.classifier.classify(&facts).await?;
        if let Some(data) = tx.data.as_ref() {
            tx_info.set_human_description(self.descriptions.describe(chain_id, tx.to, data).await);
        }

        let module = self
            .addresses
            .resolve_address(chain_id, tx.module, CONTRACT_ONLY)
            .await;
        Ok(TransactionSummary {
            id: ids::module_id(tx.safe, tx.transaction_hash),
            timestamp: tx.execution_date.timestamp_millis(),
            tx_status: if tx.is_successful {
                TransactionStatus::Success
            } else {
                TransactionStatus::Failed
            },
            tx_info,
            execution_info: Some(ExecutionInfo::Module { address: module }),
        })
    }

    async fn transfer_summary(
        &self,
        chain_id: u64,
        safe: Address,
        transfer: &IncomingTransfer,
    ) -> TransactionSummary {
        let transfer_info = match transfer.kind {
            TransferKind::Ether => TransferInfo::NativeCoin {
                value: transfer.value.unwrap_or_default(),
            },
            TransferKind::Erc20 => {
                let token_address = transfer.token_address.unwrap_or(Address::ZERO);
                let token = self.tokens.resolve_token(chain_id, token_address).await.ok();
                TransferInfo::Erc20 {
                    token_address,
                    token_name: token.as_ref().map(|t| t.name.clone()),
                    token_symbol: token.as_ref().map(|t| t.symbol.clone()),
                    decimals: token.as_ref().and_then(|t| t.decimals),
                    logo_uri: token.and_then(|t| t.logo_uri),
                    value: transfer.value.unwrap_or_default(),
                }
            }
            TransferKind::Erc721 => {
                let token_address = transfer.token_address.unwrap_or(Address::ZERO);
                let token = self.tokens.resolve_token(chain_id, token_address).await.ok();
                TransferInfo::Erc721 {
                    token_address,
                    token_name: token.as_ref().map(|t| t.name.clone()),
                    token_symbol: token.as_ref().map(|t| t.symbol.clone()),
                    logo_uri: token.and_then(|t| t.logo_uri),
                    token_id: transfer.token_id.clone().unwrap_or_default(),
                }
            }
        };

        let sender = self
            .addresses
            .resolve_address(chain_id, transfer.from, TOKEN_OR_CONTRACT)
            .await;
        let recipient = self
            .addresses
            .resolve_address(chain_id, transfer.to, TOKEN_OR_CONTRACT)
            .await;

        TransactionSummary {
            id: ids::transfer_id(safe, transfer),
            timestamp: transfer.execution_date.timestamp_millis(),
            tx_status: TransactionStatus::Success,
            tx_info: TransactionInfo::Transfer {
                sender,
                recipient,
                direction: safegate_classifier::transfer_direction(
                    safe,
                    transfer.from,
                    transfer.to,
                ),
                transfer_info,
                human_description: None,
            },
            execution_info: None,
        }
    }

    async fn creation_summary(
        &self,
        chain_id: u64,
        safe: Address,
        creation: &SafeCreation,
    ) -> TransactionSummary {
        let creator = self
            .addresses
            .resolve_address(chain_id, creation.creator, CONTRACT_ONLY)
            .await;
        let implementation = match creation.master_copy {
            Some(address) => Some(
                self.addresses
                    .resolve_address(chain_id, address, CONTRACT_ONLY)
                    .await,
            ),
            None => None,
        };
        let factory = match creation.factory_address {
            Some(address) => Some(
                self.addresses
                    .resolve_address(chain_id, address, CONTRACT_ONLY)
                    .await,
            ),
            None => None,
        };

        TransactionSummary {
            id: ids::creation_id(safe),
            timestamp: creation.created.timestamp_millis(),
            tx_status: TransactionStatus::Success,
            tx_info: TransactionInfo::Creation {
                creator,
                transaction_hash: creation.transaction_hash,
                implementation,
                factory,
                human_description: None,
            },
            execution_info: None,
        }
    }
}

fn paged<T>(results: Vec<T>, count: u64, cursor: Cursor) -> Page<T> {
    Page {
        count,
        next: cursor.next(count).map(|c| c.encode()),
        previous: cursor.previous().map(|c| c.encode()),
        results,
    }
}
