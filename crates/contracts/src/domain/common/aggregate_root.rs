/// Trait for an aggregate root
///
/// Static naming metadata used for table names, log lines and error messages.
pub trait AggregateRoot {
    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "ticket")
    fn collection_name() -> &'static str;

    /// Human-readable singular name (e.g. "Ticket")
    fn element_name() -> &'static str;

    /// Full system name, which is also the table name (e.g. "a001_ticket")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
