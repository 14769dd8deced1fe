use crate::core::transaction::{Side, Transaction};
use rust_decimal::Decimal;
use std::rc::Rc;

/// Aggregation record for all transactions sharing one key.
///
/// The same bucket shape serves both aggregation namespaces: the client
/// view keys buckets by entity, the date view by adjusted settlement
/// date. Ranks are only ever assigned to client buckets; date buckets
/// leave them at zero.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    key: String,
    transactions: Vec<Rc<Transaction>>,
    buy_total_usd: Decimal,
    sell_total_usd: Decimal,
    buy_rank: usize,
    sell_rank: usize,
}

impl Bucket {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Append a transaction and refresh both totals by rescanning the
    /// full transaction list.
    pub(crate) fn push(&mut self, tx: Rc<Transaction>) {
        self.transactions.push(tx);
        self.recompute_totals();
    }

    fn recompute_totals(&mut self) {
        self.buy_total_usd = Decimal::ZERO;
        self.sell_total_usd = Decimal::ZERO;
        for tx in &self.transactions {
            match tx.side() {
                Side::Buy => self.buy_total_usd += tx.trade_amount_usd(),
                Side::Sell => self.sell_total_usd += tx.trade_amount_usd(),
            }
        }
    }

    pub(crate) fn set_ranks(&mut self, buy: usize, sell: usize) {
        self.buy_rank = buy;
        self.sell_rank = sell;
    }

    // --- Accessors ---

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Contained transactions in arrival order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().map(Rc::as_ref)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Sum of buy-side (outgoing) USD amounts.
    pub fn buy_total_usd(&self) -> Decimal {
        self.buy_total_usd
    }

    /// Sum of sell-side (incoming) USD amounts.
    pub fn sell_total_usd(&self) -> Decimal {
        self.sell_total_usd
    }

    /// 1-based rank by buy total among client buckets; 0 until a
    /// ranking pass has assigned it.
    pub fn buy_rank(&self) -> usize {
        self.buy_rank
    }

    /// 1-based rank by sell total among client buckets; 0 until a
    /// ranking pass has assigned it.
    pub fn sell_rank(&self) -> usize {
        self.sell_rank
    }
}
