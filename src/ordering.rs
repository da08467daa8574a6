//! Deterministic ordering and totals over cart lines.

use crate::domain::CartItem;
use std::cmp::Ordering;

/// Descending by line total; equal totals fall back to ascending product
/// id so the final sequence is fully deterministic (the source comparator
/// left ties unresolved).
pub fn by_total_desc(a: &CartItem, b: &CartItem) -> Ordering {
    b.total_amount
        .total_cmp(&a.total_amount)
        .then_with(|| a.product_id.cmp(&b.product_id))
}

/// Sum of line totals. Items arrive already sorted, so the accumulation
/// order is fixed across runs.
pub fn total_amount(items: &[CartItem]) -> f64 {
    items.iter().map(|item| item.total_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductId;

    fn item(product_id: u64, total_amount: f64) -> CartItem {
        CartItem {
            product_id: ProductId(product_id),
            total_amount,
        }
    }

    #[test]
    fn larger_total_sorts_first() {
        let mut items = vec![item(101, 25.5), item(102, 20.6), item(103, 50.4)];
        items.sort_by(by_total_desc);
        let totals: Vec<f64> = items.iter().map(|i| i.total_amount).collect();
        assert_eq!(totals, vec![50.4, 25.5, 20.6]);
    }

    #[test]
    fn equal_totals_break_ties_by_product_id() {
        let mut items = vec![item(200, 10.0), item(100, 10.0), item(150, 10.0)];
        items.sort_by(by_total_desc);
        let products: Vec<ProductId> = items.iter().map(|i| i.product_id).collect();
        assert_eq!(products, vec![ProductId(100), ProductId(150), ProductId(200)]);
    }

    #[test]
    fn ordering_is_stable_across_runs() {
        let base = vec![item(103, 50.4), item(101, 25.5), item(102, 20.6)];
        let mut first = base.clone();
        let mut second: Vec<CartItem> = base.into_iter().rev().collect();
        first.sort_by(by_total_desc);
        second.sort_by(by_total_desc);
        assert_eq!(first, second);
    }

    #[test]
    fn total_amount_sums_line_totals() {
        let items = vec![item(103, 50.4), item(101, 25.5), item(102, 20.6)];
        assert!((total_amount(&items) - 96.5).abs() < 1e-9);
    }

    #[test]
    fn total_amount_of_empty_cart_is_zero() {
        assert_eq!(total_amount(&[]), 0.0);
    }
}
