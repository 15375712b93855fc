//! XDR builders shared by the unit tests.

use stellar_xdr::curr::{
    ContractDataDurability, ContractDataEntry, ContractEvent, ContractEventBody,
    ContractEventType, ContractEventV0, ContractId, DiagnosticEvent, ExtensionPoint, Hash,
    HostFunction, InvokeContractArgs, InvokeHostFunctionOp, LedgerEntry, LedgerEntryChange,
    LedgerEntryChanges, LedgerEntryData, LedgerEntryExt, LedgerFootprint, LedgerKey,
    LedgerKeyTtl, Memo, MuxedAccount, Operation, OperationBody, OperationMeta, OperationMetaV2,
    Preconditions,
    ScAddress, ScBytes, ScString, ScSymbol, ScVal, SequenceNumber, SorobanResources,
    SorobanTransactionData, SorobanTransactionDataExt, SorobanTransactionMeta,
    SorobanTransactionMetaExt, Transaction, TransactionEnvelope, TransactionExt, TransactionMeta,
    TransactionMetaV2, TransactionMetaV3, TransactionMetaV4, TransactionV1Envelope, Uint256, VecM,
};

pub fn symbol(s: &str) -> ScVal {
    ScVal::Symbol(ScSymbol(s.to_string().try_into().unwrap()))
}

pub fn string(s: &str) -> ScVal {
    ScVal::String(ScString(s.to_string().try_into().unwrap()))
}

pub fn contract_event(
    type_: ContractEventType,
    topics: Vec<ScVal>,
    data: ScVal,
) -> DiagnosticEvent {
    DiagnosticEvent {
        in_successful_contract_call: true,
        event: ContractEvent {
            ext: ExtensionPoint::V0,
            contract_id: Some(ContractId(Hash([1u8; 32]))),
            type_,
            body: ContractEventBody::V0(ContractEventV0 {
                topics: topics.try_into().unwrap(),
                data,
            }),
        },
    }
}

/// Diagnostic event as the host emits it for a single core metric.
pub fn core_metric(metric: &str, data: ScVal) -> DiagnosticEvent {
    let mut event = contract_event(
        ContractEventType::Diagnostic,
        vec![symbol("core_metrics"), symbol(metric)],
        data,
    );
    event.event.contract_id = None;
    event
}

pub fn ttl_key() -> LedgerKey {
    LedgerKey::Ttl(LedgerKeyTtl {
        key_hash: Hash([9u8; 32]),
    })
}

fn keys(count: usize, seed: u8) -> VecM<LedgerKey> {
    (0..count)
        .map(|i| {
            LedgerKey::Ttl(LedgerKeyTtl {
                key_hash: Hash([seed.wrapping_add(i as u8); 32]),
            })
        })
        .collect::<Vec<_>>()
        .try_into()
        .unwrap()
}

pub fn transaction_data(
    read_only: usize,
    read_write: usize,
    read_bytes: u32,
    write_bytes: u32,
) -> SorobanTransactionData {
    SorobanTransactionData {
        ext: SorobanTransactionDataExt::V0,
        resources: SorobanResources {
            footprint: LedgerFootprint {
                read_only: keys(read_only, 0),
                read_write: keys(read_write, 100),
            },
            instructions: 1_000_000,
            disk_read_bytes: read_bytes,
            write_bytes,
        },
        resource_fee: 50_000,
    }
}

/// Persistent contract data entry holding `len` bytes.
pub fn contract_data_entry(len: usize) -> LedgerEntry {
    LedgerEntry {
        last_modified_ledger_seq: 1,
        data: LedgerEntryData::ContractData(ContractDataEntry {
            ext: ExtensionPoint::V0,
            contract: ScAddress::Contract(ContractId(Hash([2u8; 32]))),
            key: symbol("balance"),
            durability: ContractDataDurability::Persistent,
            val: ScVal::Bytes(ScBytes(vec![7u8; len].try_into().unwrap())),
        }),
        ext: LedgerEntryExt::V0,
    }
}

pub fn meta_v3(
    operations: Vec<Vec<LedgerEntryChange>>,
    diagnostic_events: Option<Vec<DiagnosticEvent>>,
) -> TransactionMeta {
    let operations: Vec<OperationMeta> = operations
        .into_iter()
        .map(|changes| OperationMeta {
            changes: LedgerEntryChanges(changes.try_into().unwrap()),
        })
        .collect();

    TransactionMeta::V3(TransactionMetaV3 {
        ext: ExtensionPoint::V0,
        tx_changes_before: LedgerEntryChanges(VecM::default()),
        operations: operations.try_into().unwrap(),
        tx_changes_after: LedgerEntryChanges(VecM::default()),
        soroban_meta: diagnostic_events.map(|events| SorobanTransactionMeta {
            ext: SorobanTransactionMetaExt::V0,
            events: VecM::default(),
            return_value: ScVal::Void,
            diagnostic_events: events.try_into().unwrap(),
        }),
    })
}

/// Protocol 23 metadata: diagnostics live at the top level.
pub fn meta_v4(
    operations: Vec<Vec<LedgerEntryChange>>,
    diagnostic_events: Vec<DiagnosticEvent>,
) -> TransactionMeta {
    let operations: Vec<OperationMetaV2> = operations
        .into_iter()
        .map(|changes| OperationMetaV2 {
            ext: ExtensionPoint::V0,
            changes: LedgerEntryChanges(changes.try_into().unwrap()),
            events: VecM::default(),
        })
        .collect();

    TransactionMeta::V4(TransactionMetaV4 {
        ext: ExtensionPoint::V0,
        tx_changes_before: LedgerEntryChanges(VecM::default()),
        operations: operations.try_into().unwrap(),
        tx_changes_after: LedgerEntryChanges(VecM::default()),
        soroban_meta: None,
        events: VecM::default(),
        diagnostic_events: diagnostic_events.try_into().unwrap(),
    })
}

pub fn meta_v2(operations: Vec<Vec<LedgerEntryChange>>) -> TransactionMeta {
    let operations: Vec<OperationMeta> = operations
        .into_iter()
        .map(|changes| OperationMeta {
            changes: LedgerEntryChanges(changes.try_into().unwrap()),
        })
        .collect();

    TransactionMeta::V2(TransactionMetaV2 {
        tx_changes_before: LedgerEntryChanges(VecM::default()),
        operations: operations.try_into().unwrap(),
        tx_changes_after: LedgerEntryChanges(VecM::default()),
    })
}

pub fn envelope() -> TransactionEnvelope {
    let invoke_op = InvokeHostFunctionOp {
        host_function: HostFunction::InvokeContract(InvokeContractArgs {
            contract_address: ScAddress::Contract(ContractId(Hash([2u8; 32]))),
            function_name: ScSymbol("transfer".to_string().try_into().unwrap()),
            args: vec![ScVal::Bool(true)].try_into().unwrap(),
        }),
        auth: VecM::default(),
    };

    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: Transaction {
            source_account: MuxedAccount::Ed25519(Uint256([0u8; 32])),
            fee: 100,
            seq_num: SequenceNumber(42),
            cond: Preconditions::None,
            memo: Memo::None,
            operations: vec![Operation {
                source_account: None,
                body: OperationBody::InvokeHostFunction(invoke_op),
            }]
            .try_into()
            .unwrap(),
            ext: TransactionExt::V0,
        },
        signatures: VecM::default(),
    })
}
