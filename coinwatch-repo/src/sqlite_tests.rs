//! SQLite store integration tests.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use coinwatch_types::{
        Currency, CurrencyPrice, CurrencyStore, PriceStore, StoreError, Symbol,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn currency(symbol: &str, name: &str) -> Currency {
        Currency::new(Symbol::new(symbol), name).unwrap()
    }

    fn price(symbol: &str, value: f64, at: DateTime<Utc>) -> CurrencyPrice {
        CurrencyPrice::new(Symbol::new(symbol), value, at)
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, day, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_currency() {
        let repo = setup_repo().await;

        repo.create(&currency("BTC", "Bitcoin")).await.unwrap();

        let fetched = repo
            .get_by_symbol(&Symbol::new("BTC"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.symbol.as_str(), "BTC");
        assert_eq!(fetched.name, "Bitcoin");
    }

    #[tokio::test]
    async fn test_get_currency_not_found() {
        let repo = setup_repo().await;

        let result = repo.get_by_symbol(&Symbol::new("BTC")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let repo = setup_repo().await;

        repo.create(&currency("BTC", "Bitcoin")).await.unwrap();

        let result = repo.get_by_symbol(&Symbol::new("btc")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_symbol_conflicts() {
        let repo = setup_repo().await;

        repo.create(&currency("BTC", "Bitcoin")).await.unwrap();
        let result = repo.create(&currency("BTC", "Bitcoin Again")).await;

        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_list_currencies_sorted_by_symbol() {
        let repo = setup_repo().await;

        repo.create(&currency("ETH", "Ethereum")).await.unwrap();
        repo.create(&currency("BTC", "Bitcoin")).await.unwrap();
        repo.create(&currency("ADA", "Cardano")).await.unwrap();

        let currencies = repo.list().await.unwrap();
        let symbols: Vec<&str> = currencies.iter().map(|c| c.symbol.as_str()).collect();

        assert_eq!(symbols, vec!["ADA", "BTC", "ETH"]);
    }

    #[tokio::test]
    async fn test_update_currency_name() {
        let repo = setup_repo().await;

        repo.create(&currency("BTC", "Bitcoin")).await.unwrap();

        let updated = repo.update(&currency("BTC", "Bitcoin Core")).await.unwrap();
        assert!(updated);

        let fetched = repo
            .get_by_symbol(&Symbol::new("BTC"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "Bitcoin Core");
        assert!(fetched.updated_at >= fetched.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_currency_returns_false() {
        let repo = setup_repo().await;

        let updated = repo.update(&currency("BTC", "Bitcoin")).await.unwrap();

        assert!(!updated);
    }

    #[tokio::test]
    async fn test_delete_currency() {
        let repo = setup_repo().await;

        repo.create(&currency("BTC", "Bitcoin")).await.unwrap();

        assert!(repo.delete(&Symbol::new("BTC")).await.unwrap());
        assert!(repo.get_by_symbol(&Symbol::new("BTC")).await.unwrap().is_none());
        assert!(!repo.delete(&Symbol::new("BTC")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_leaves_price_rows() {
        let repo = setup_repo().await;

        repo.create(&currency("BTC", "Bitcoin")).await.unwrap();
        repo.save_price(&price("BTC", 64000.0, at(1, 12))).await.unwrap();

        assert!(repo.delete(&Symbol::new("BTC")).await.unwrap());

        let kept = repo.latest_price(&Symbol::new("BTC")).await.unwrap();
        assert!(kept.is_some());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Price queries
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_latest_price() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(1, 0))).await.unwrap();
        repo.save_price(&price("BTC", 300.0, at(3, 0))).await.unwrap();
        repo.save_price(&price("BTC", 200.0, at(2, 0))).await.unwrap();

        let latest = repo.latest_price(&Symbol::new("BTC")).await.unwrap().unwrap();

        assert_eq!(latest.price, 300.0);
        assert_eq!(latest.timestamp, at(3, 0));
    }

    #[tokio::test]
    async fn test_latest_price_empty() {
        let repo = setup_repo().await;

        let latest = repo.latest_price(&Symbol::new("BTC")).await.unwrap();

        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn test_price_at_or_before_picks_floor() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(1, 0))).await.unwrap();
        repo.save_price(&price("BTC", 110.0, at(3, 0))).await.unwrap();
        repo.save_price(&price("BTC", 120.0, at(5, 0))).await.unwrap();

        let found = repo
            .price_at_or_before(&Symbol::new("BTC"), at(4, 0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.price, 110.0);
        assert_eq!(found.timestamp, at(3, 0));
    }

    #[tokio::test]
    async fn test_price_at_or_before_exact_match() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(1, 0))).await.unwrap();
        repo.save_price(&price("BTC", 110.0, at(3, 0))).await.unwrap();

        let found = repo
            .price_at_or_before(&Symbol::new("BTC"), at(3, 0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.price, 110.0);
    }

    #[tokio::test]
    async fn test_price_at_or_before_nothing_earlier() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(10, 0))).await.unwrap();

        let found = repo
            .price_at_or_before(&Symbol::new("BTC"), at(5, 0))
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_price_at_or_before_ignores_later_rows() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(2, 0))).await.unwrap();
        repo.save_price(&price("BTC", 999.0, at(20, 0))).await.unwrap();

        let found = repo
            .price_at_or_before(&Symbol::new("BTC"), at(10, 0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.price, 100.0);
    }

    #[tokio::test]
    async fn test_sub_second_ordering_preserved() {
        // Fixed-width storage keeps fractional seconds comparable as text.
        let repo = setup_repo().await;
        let base = at(1, 12);

        repo.save_price(&price("BTC", 100.0, base)).await.unwrap();
        repo.save_price(&price("BTC", 101.0, base + Duration::milliseconds(500)))
            .await
            .unwrap();

        let found = repo
            .price_at_or_before(&Symbol::new("BTC"), base + Duration::seconds(1))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.price, 101.0);
    }

    #[tokio::test]
    async fn test_price_history_descending() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(1, 0))).await.unwrap();
        repo.save_price(&price("BTC", 300.0, at(3, 0))).await.unwrap();
        repo.save_price(&price("BTC", 200.0, at(2, 0))).await.unwrap();

        let history = repo
            .price_history(&Symbol::new("BTC"), at(1, 0), at(4, 0), 10)
            .await
            .unwrap();

        let values: Vec<f64> = history.iter().map(|p| p.price).collect();
        assert_eq!(values, vec![300.0, 200.0, 100.0]);
    }

    #[tokio::test]
    async fn test_price_history_window_is_inclusive() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(1, 0))).await.unwrap();
        repo.save_price(&price("BTC", 200.0, at(2, 0))).await.unwrap();
        repo.save_price(&price("BTC", 300.0, at(3, 0))).await.unwrap();

        let history = repo
            .price_history(&Symbol::new("BTC"), at(1, 0), at(2, 0), 10)
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].timestamp, at(2, 0));
        assert_eq!(history[1].timestamp, at(1, 0));
    }

    #[tokio::test]
    async fn test_price_history_respects_limit() {
        let repo = setup_repo().await;

        for day in 1..=5 {
            repo.save_price(&price("BTC", day as f64, at(day, 0)))
                .await
                .unwrap();
        }

        let history = repo
            .price_history(&Symbol::new("BTC"), at(1, 0), at(10, 0), 2)
            .await
            .unwrap();

        // Newest two rows win.
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].price, 5.0);
        assert_eq!(history[1].price, 4.0);
    }

    #[tokio::test]
    async fn test_price_history_no_cap_when_limit_not_positive() {
        let repo = setup_repo().await;

        for day in 1..=5 {
            repo.save_price(&price("BTC", day as f64, at(day, 0)))
                .await
                .unwrap();
        }

        let all = repo
            .price_history(&Symbol::new("BTC"), at(1, 0), at(10, 0), 0)
            .await
            .unwrap();
        assert_eq!(all.len(), 5);

        let all_again = repo
            .price_history(&Symbol::new("BTC"), at(1, 0), at(10, 0), -3)
            .await
            .unwrap();
        assert_eq!(all_again.len(), 5);
    }

    #[tokio::test]
    async fn test_price_history_excludes_other_symbols() {
        let repo = setup_repo().await;

        repo.save_price(&price("BTC", 100.0, at(1, 0))).await.unwrap();
        repo.save_price(&price("ETH", 10.0, at(1, 6))).await.unwrap();

        let history = repo
            .price_history(&Symbol::new("BTC"), at(1, 0), at(2, 0), 10)
            .await
            .unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].symbol.as_str(), "BTC");
    }
}
