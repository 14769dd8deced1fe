use crate::core::bucket::Bucket;
use crate::core::calendar::DateKey;
use crate::core::client::ClientId;
use crate::core::transaction::{MalformedTransaction, Transaction};
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Insertion-ordered bucket collection keyed by `K`.
///
/// `HashMap` iteration order is arbitrary; reports and the last-date
/// query need first-seen order, so buckets live in a `Vec` and the map
/// only stores positions.
#[derive(Debug, Clone)]
struct BucketSeq<K> {
    index: HashMap<K, usize>,
    buckets: Vec<Bucket>,
}

impl<K> Default for BucketSeq<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            buckets: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> BucketSeq<K> {
    /// Bucket for `key`, created at the back on first sight.
    fn bucket_mut(&mut self, key: &K, label: &str) -> &mut Bucket {
        let next = self.buckets.len();
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                self.index.insert(key.clone(), next);
                self.buckets.push(Bucket::new(label));
                next
            }
        };
        &mut self.buckets[pos]
    }

    fn get(&self, key: &K) -> Option<&Bucket> {
        self.index.get(key).map(|&pos| &self.buckets[pos])
    }

    fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, Bucket> {
        self.buckets.iter_mut()
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn last(&self) -> Option<&Bucket> {
        self.buckets.last()
    }
}

/// The register: two parallel aggregations over one transaction stream.
///
/// Every ingested transaction lands in exactly one client bucket and
/// exactly one settlement-date bucket; both views hold the same `Rc`'d
/// transaction. Each register owns its own mappings, so independent
/// registers never observe each other's state.
///
/// Not synchronized: ingestion and ranking read-then-write both
/// mappings, so concurrent use requires an external lock around the
/// whole value.
///
/// # Examples
///
/// ```
/// use trade_register::core::register::TradeRegister;
///
/// let mut register = TradeRegister::new();
/// register
///     .ingest(&["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"])
///     .unwrap();
/// assert_eq!(register.client_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TradeRegister {
    by_client: BucketSeq<ClientId>,
    by_date: BucketSeq<DateKey>,
    ranking_stale: bool,
}

impl TradeRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and ingest a raw eight-field instruction.
    ///
    /// A malformed instruction leaves the register completely
    /// untouched: parsing happens before any bucket is looked up.
    pub fn ingest<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), MalformedTransaction> {
        let tx = Transaction::parse(fields)?;
        self.insert(tx);
        Ok(())
    }

    /// Ingest an already-parsed transaction.
    pub fn insert(&mut self, tx: Transaction) {
        let tx = Rc::new(tx);
        let client_key = tx.entity().clone();
        let date_key = tx.settlement_date_key();
        debug!(
            "ingest {} {} {} USD, settles {}",
            client_key,
            tx.side(),
            tx.trade_amount_usd(),
            date_key
        );
        self.by_client
            .bucket_mut(&client_key, client_key.as_str())
            .push(Rc::clone(&tx));
        self.by_date.bucket_mut(&date_key, date_key.as_str()).push(tx);
        self.ranking_stale = true;
    }

    /// Number of distinct clients seen so far.
    pub fn client_count(&self) -> usize {
        self.by_client.len()
    }

    /// Number of distinct adjusted settlement dates seen so far.
    pub fn date_count(&self) -> usize {
        self.by_date.len()
    }

    /// True when an ingestion has happened since the last ranking pass.
    pub fn ranking_stale(&self) -> bool {
        self.ranking_stale
    }

    /// 1-based rank of the client's buy (outgoing) total, or 0 for a
    /// client never ingested. Runs a ranking pass first if stale.
    pub fn buy_rank_of(&mut self, client: &ClientId) -> usize {
        if self.ranking_stale {
            self.rank_clients();
        }
        self.by_client.get(client).map_or(0, Bucket::buy_rank)
    }

    /// 1-based rank of the client's sell (incoming) total, or 0 for a
    /// client never ingested. Runs a ranking pass first if stale.
    pub fn sell_rank_of(&mut self, client: &ClientId) -> usize {
        if self.ranking_stale {
            self.rank_clients();
        }
        self.by_client.get(client).map_or(0, Bucket::sell_rank)
    }

    /// Recompute both rank assignments for every client bucket.
    ///
    /// Always recomputes when called; the stale flag only gates whether
    /// a query triggers it. Each bucket's rank is the 1-based position
    /// of the first entry equal to its total in the descending total
    /// sequence, so exact ties share the first tied entry's rank and
    /// the next distinct total takes its literal sorted position.
    pub fn rank_clients(&mut self) {
        let mut buy_totals: Vec<Decimal> = self.by_client.iter().map(Bucket::buy_total_usd).collect();
        let mut sell_totals: Vec<Decimal> =
            self.by_client.iter().map(Bucket::sell_total_usd).collect();
        buy_totals.sort_unstable_by(|a, b| b.cmp(a));
        sell_totals.sort_unstable_by(|a, b| b.cmp(a));

        for bucket in self.by_client.iter_mut() {
            let buy = rank_of(&buy_totals, bucket.buy_total_usd());
            let sell = rank_of(&sell_totals, bucket.sell_total_usd());
            bucket.set_ranks(buy, sell);
        }
        self.ranking_stale = false;
    }

    /// Key of the most recently created settlement-date bucket, or
    /// `None` before any ingestion.
    ///
    /// Follows bucket creation order, not calendar order: a date
    /// revisited by a later transaction does not move to the back.
    pub fn last_settlement_date_key(&self) -> Option<&str> {
        self.by_date.last().map(Bucket::key)
    }

    /// Client buckets in first-seen order, ranks freshly assigned.
    pub fn clients(&mut self) -> impl Iterator<Item = &Bucket> + '_ {
        if self.ranking_stale {
            self.rank_clients();
        }
        self.by_client.iter()
    }

    /// Settlement-date buckets in first-seen order. Ranks are refreshed
    /// first so a combined report never mixes stale and fresh views.
    pub fn dates(&mut self) -> impl Iterator<Item = &Bucket> + '_ {
        if self.ranking_stale {
            self.rank_clients();
        }
        self.by_date.iter()
    }
}

/// 1-based position of the first value equal to `total` in a descending
/// sequence; 0 when absent.
fn rank_of(sorted_desc: &[Decimal], total: Decimal) -> usize {
    sorted_desc
        .iter()
        .position(|value| *value == total)
        .map_or(0, |index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest(register: &mut TradeRegister, fields: [&str; 8]) {
        register.ingest(&fields).unwrap();
    }

    #[test]
    fn test_ingest_marks_ranking_stale() {
        let mut register = TradeRegister::new();
        assert!(!register.ranking_stale());
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        assert!(register.ranking_stale());
        register.rank_clients();
        assert!(!register.ranking_stale());
    }

    #[test]
    fn test_client_count_is_distinct() {
        let mut register = TradeRegister::new();
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        ingest(
            &mut register,
            ["foo", "S", "0.22", "AED", "05 Jan 2016", "07 Jan 2016", "450", "150.5"],
        );
        ingest(
            &mut register,
            ["bar", "B", "0.22", "AED", "05 Jan 2016", "09 Jan 2016", "50", "350.5"],
        );
        assert_eq!(register.client_count(), 2);
    }

    #[test]
    fn test_malformed_instruction_mutates_nothing() {
        let mut register = TradeRegister::new();
        let result = register.ingest(&[
            "foo",
            "B",
            "not-a-number",
            "SGP",
            "01 Jan 2016",
            "02 Jan 2016",
            "200",
            "100.25",
        ]);
        assert!(result.is_err());
        assert_eq!(register.client_count(), 0);
        assert_eq!(register.date_count(), 0);
        assert!(!register.ranking_stale());
        assert!(register.last_settlement_date_key().is_none());
    }

    #[test]
    fn test_transaction_lands_in_both_views() {
        let mut register = TradeRegister::new();
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        assert_eq!(register.client_count(), 1);
        assert_eq!(register.date_count(), 1);

        let client_total: usize = register.clients().map(Bucket::transaction_count).sum();
        let date_total: usize = register.dates().map(Bucket::transaction_count).sum();
        assert_eq!(client_total, 1);
        assert_eq!(date_total, 1);
    }

    #[test]
    fn test_unknown_client_ranks_zero() {
        let mut register = TradeRegister::new();
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        assert_eq!(register.buy_rank_of(&ClientId::new("nobody")), 0);
        assert_eq!(register.sell_rank_of(&ClientId::new("nobody")), 0);
    }

    #[test]
    fn test_rank_query_triggers_pass() {
        let mut register = TradeRegister::new();
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        assert!(register.ranking_stale());
        assert_eq!(register.buy_rank_of(&ClientId::new("foo")), 1);
        assert!(!register.ranking_stale());
    }

    #[test]
    fn test_strictly_ordered_totals_rank_in_order() {
        let mut register = TradeRegister::new();
        // foo buys 10025 USD, bar buys 3855.5 USD.
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        ingest(
            &mut register,
            ["bar", "B", "0.22", "AED", "05 Jan 2016", "09 Jan 2016", "50", "350.5"],
        );
        assert_eq!(register.buy_rank_of(&ClientId::new("foo")), 1);
        assert_eq!(register.buy_rank_of(&ClientId::new("bar")), 2);
    }

    #[test]
    fn test_tied_totals_share_rank() {
        let mut register = TradeRegister::new();
        // Two clients buy identical amounts, a third buys less.
        ingest(
            &mut register,
            ["foo", "B", "1", "USD", "01 Jan 2016", "05 Jan 2016", "100", "1"],
        );
        ingest(
            &mut register,
            ["bar", "B", "1", "USD", "01 Jan 2016", "05 Jan 2016", "100", "1"],
        );
        ingest(
            &mut register,
            ["cag", "B", "1", "USD", "01 Jan 2016", "05 Jan 2016", "50", "1"],
        );
        assert_eq!(register.buy_rank_of(&ClientId::new("foo")), 1);
        assert_eq!(register.buy_rank_of(&ClientId::new("bar")), 1);
        // Next distinct total takes its literal position in the sorted
        // sequence, after both tied entries.
        assert_eq!(register.buy_rank_of(&ClientId::new("cag")), 3);
    }

    #[test]
    fn test_ranking_pass_is_idempotent() {
        let mut register = TradeRegister::new();
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        ingest(
            &mut register,
            ["bar", "S", "0.22", "BGA", "05 Jan 2016", "15 Jan 2016", "100", "250.5"],
        );
        register.rank_clients();
        let first: Vec<(usize, usize)> = register
            .clients()
            .map(|b| (b.buy_rank(), b.sell_rank()))
            .collect();
        register.rank_clients();
        let second: Vec<(usize, usize)> = register
            .clients()
            .map(|b| (b.buy_rank(), b.sell_rank()))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_settlement_date_key_tracks_bucket_creation() {
        let mut register = TradeRegister::new();
        ingest(
            &mut register,
            ["foo", "B", "0.50", "SGP", "01 Jan 2016", "02 Jan 2016", "200", "100.25"],
        );
        assert_eq!(register.last_settlement_date_key(), Some("04 Jan 2016"));

        ingest(
            &mut register,
            ["foo", "S", "0.22", "AED", "05 Jan 2016", "07 Jan 2016", "450", "150.5"],
        );
        assert_eq!(register.last_settlement_date_key(), Some("07 Jan 2016"));

        // Another transaction for an existing date creates no bucket,
        // so the last key stays put.
        ingest(
            &mut register,
            ["bar", "B", "0.10", "USD", "05 Jan 2016", "07 Jan 2016", "10", "10"],
        );
        assert_eq!(register.last_settlement_date_key(), Some("07 Jan 2016"));
    }
}
