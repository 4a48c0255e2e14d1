//! # Field Identities
//!
//! Every field a schema can declare has a stable enumerated identity. The
//! identity is unique within a schema and is what callers pass to the typed
//! accessors; it never appears in the binary encoding.
//!
//! `Invalid` is a reserved sentinel that no schema may use. `Generic` is
//! reserved for ad hoc composition of records without a schema. `Test1`
//! through `Test4` exist only for unit tests.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Invalid,
    Generic,

    Account,
    Amount,
    Balance,
    Destination,
    EmailHash,
    ExpireLedger,
    Extensions,
    Flags,
    Identifier,
    InvoiceId,
    LedgerHash,
    Limit,
    MessageKey,
    PubKey,
    Sequence,
    Signature,
    SigningKey,
    SourceTag,
    Target,
    WalletLocator,

    Test1,
    Test2,
    Test3,
    Test4,
}

impl FieldId {
    /// Diagnostic label; also the default JSON key for generic records.
    pub fn name(&self) -> &'static str {
        match self {
            FieldId::Invalid => "Invalid",
            FieldId::Generic => "Generic",
            FieldId::Account => "Account",
            FieldId::Amount => "Amount",
            FieldId::Balance => "Balance",
            FieldId::Destination => "Destination",
            FieldId::EmailHash => "EmailHash",
            FieldId::ExpireLedger => "ExpireLedger",
            FieldId::Extensions => "Extensions",
            FieldId::Flags => "Flags",
            FieldId::Identifier => "Identifier",
            FieldId::InvoiceId => "InvoiceId",
            FieldId::LedgerHash => "LedgerHash",
            FieldId::Limit => "Limit",
            FieldId::MessageKey => "MessageKey",
            FieldId::PubKey => "PubKey",
            FieldId::Sequence => "Sequence",
            FieldId::Signature => "Signature",
            FieldId::SigningKey => "SigningKey",
            FieldId::SourceTag => "SourceTag",
            FieldId::Target => "Target",
            FieldId::WalletLocator => "WalletLocator",
            FieldId::Test1 => "Test1",
            FieldId::Test2 => "Test2",
            FieldId::Test3 => "Test3",
            FieldId::Test4 => "Test4",
        }
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
