//! End-to-end pipeline tests against mock transports.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::cancellation::CancellationToken;
    use crate::errors::SiftError;
    use crate::models::{ResultItem, SearchHit};
    use crate::pipeline::Pipeline;
    use crate::rules::{ContentSelector, ExtractionRule, RuleTable};
    use crate::testing::{MockFetcher, MockSearcher};

    const ZAP_ARTICLE: &str = "https://zapfinance.co.id/blog/budgeting-101";
    const ZAP_ACADEMY: &str = "https://zapfinance.co.id/academy/intro";
    const UNRULED: &str = "https://plainblog.example/posts/saving";

    /// A zapfinance-shaped page: the rule slices between the `h6` "Articles"
    /// marker and the `h4` comment-form marker.
    fn zap_page(body: &str) -> String {
        format!(
            "<html><body><nav>menu</nav><h6>Articles</h6><p>{body}</p>\
             <h4>Tuliskan Komentar Cancel reply</h4><footer>footer</footer></body></html>"
        )
    }

    fn pipeline_with(
        searcher: Arc<MockSearcher>,
        fetcher: Arc<MockFetcher>,
        rules: RuleTable,
    ) -> Pipeline {
        Pipeline::new(searcher, fetcher, rules)
    }

    #[tokio::test]
    async fn test_zero_upstream_results_is_empty_set_not_error() {
        let searcher = Arc::new(MockSearcher::new());
        let fetcher = Arc::new(MockFetcher::new());
        let pipeline = pipeline_with(searcher, fetcher.clone(), RuleTable::defaults().unwrap());

        let results = pipeline
            .run("no such thing", &CancellationToken::new())
            .await
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_is_terminal() {
        let searcher = Arc::new(MockSearcher::returning_error(SiftError::SearchUpstream {
            status: 403,
        }));
        let fetcher = Arc::new(MockFetcher::new());
        let pipeline = pipeline_with(searcher, fetcher.clone(), RuleTable::defaults().unwrap());

        let err = pipeline
            .run("anything", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SiftError::SearchUpstream { status: 403 }));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_ruled_domain_yields_selected_content() {
        let searcher = Arc::new(MockSearcher::returning_hits(vec![SearchHit::new(
            "Budgeting 101",
            ZAP_ARTICLE,
        )]));
        let fetcher = Arc::new(MockFetcher::new().with_page(ZAP_ARTICLE, zap_page("Spend less.")));
        let pipeline = pipeline_with(searcher, fetcher, RuleTable::defaults().unwrap());

        let results = pipeline
            .run("budgeting tips", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            results.results,
            vec![ResultItem::new("Budgeting 101", ZAP_ARTICLE, "Spend less.")]
        );
    }

    #[tokio::test]
    async fn test_excluded_url_is_never_fetched_and_emits_empty_item() {
        let searcher = Arc::new(MockSearcher::returning_hits(vec![SearchHit::new(
            "Academy intro",
            ZAP_ACADEMY,
        )]));
        let fetcher = Arc::new(MockFetcher::new());
        let pipeline = pipeline_with(searcher, fetcher.clone(), RuleTable::defaults().unwrap());

        let results = pipeline
            .run("zap academy", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results.results, vec![ResultItem::excluded()]);
        assert_eq!(fetcher.fetch_count_for(ZAP_ACADEMY), 0);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unruled_domain_yields_raw_extracted_text() {
        let searcher = Arc::new(MockSearcher::returning_hits(vec![SearchHit::new(
            "Saving up",
            UNRULED,
        )]));
        let fetcher = Arc::new(
            MockFetcher::new().with_page(UNRULED, "<h1>Saving up</h1><p>Put money aside.</p>"),
        );
        let pipeline = pipeline_with(searcher, fetcher, RuleTable::defaults().unwrap());

        let results = pipeline
            .run("saving", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            results.results,
            vec![ResultItem::new(
                "Saving up",
                UNRULED,
                "# Saving up\n\nPut money aside."
            )]
        );
    }

    #[tokio::test]
    async fn test_budgeting_scenario_preserves_order_across_ruled_and_unruled() {
        let searcher = Arc::new(MockSearcher::returning_hits(vec![
            SearchHit::new("Budgeting 101", ZAP_ARTICLE),
            SearchHit::new("Saving up", UNRULED),
        ]));
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_page(ZAP_ARTICLE, zap_page("Track every expense."))
                .with_page(UNRULED, "<p>Plain advice.</p>")
                // The first hit finishes last; output order must not change.
                .with_delay(ZAP_ARTICLE, Duration::from_millis(50)),
        );
        let pipeline = pipeline_with(searcher, fetcher, RuleTable::defaults().unwrap());

        let results = pipeline
            .run("budgeting tips", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results.results[0].url, ZAP_ARTICLE);
        assert_eq!(results.results[0].content, "Track every expense.");
        assert_eq!(results.results[1].url, UNRULED);
        assert_eq!(results.results[1].content, "Plain advice.");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated_to_its_item() {
        let failing = "https://plainblog.example/posts/broken";
        let searcher = Arc::new(MockSearcher::returning_hits(vec![
            SearchHit::new("First", UNRULED),
            SearchHit::new("Broken", failing),
            SearchHit::new("Third", "https://plainblog.example/posts/third"),
        ]));
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_page(UNRULED, "<p>one</p>")
                .with_failure(failing)
                .with_page("https://plainblog.example/posts/third", "<p>three</p>"),
        );
        let pipeline = pipeline_with(searcher, fetcher.clone(), RuleTable::new());

        let results = pipeline
            .run("posts", &CancellationToken::new())
            .await
            .unwrap();

        // The failed hit is absent, not an empty placeholder; siblings survive
        // in their original order.
        let contents: Vec<&str> = results.results.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "three"]);
        assert_eq!(fetcher.fetch_count_for(failing), 1);
    }

    #[tokio::test]
    async fn test_selector_miss_drops_only_that_item() {
        let other_zap = "https://zapfinance.co.id/blog/markers-gone";
        let searcher = Arc::new(MockSearcher::returning_hits(vec![
            SearchHit::new("Good", ZAP_ARTICLE),
            SearchHit::new("Relayouted", other_zap),
        ]));
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_page(ZAP_ARTICLE, zap_page("Still fine."))
                // Page layout changed: the end marker is missing.
                .with_page(other_zap, "<h6>Articles</h6><p>No closing marker.</p>"),
        );
        let pipeline = pipeline_with(searcher, fetcher, RuleTable::defaults().unwrap());

        let results = pipeline
            .run("zap", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results.results[0].content, "Still fine.");
    }

    #[tokio::test]
    async fn test_first_matching_rule_wins_for_enrichment() {
        let url = "https://blog.example.com/post";
        let rules = RuleTable::new()
            .with_rule(ExtractionRule::new(
                "example.com",
                ContentSelector::between("START", "END").unwrap(),
            ))
            .with_rule(ExtractionRule::new(
                "blog.example.com",
                ContentSelector::FullText,
            ));

        let searcher = Arc::new(MockSearcher::returning_hits(vec![SearchHit::new(
            "Post", url,
        )]));
        let fetcher =
            Arc::new(MockFetcher::new().with_page(url, "<p>START inner END trailing</p>"));
        let pipeline = pipeline_with(searcher, fetcher, rules);

        let results = pipeline.run("post", &CancellationToken::new()).await.unwrap();

        // The earlier rule's selector applied, not the later FullText one.
        assert_eq!(results.results[0].content, "inner");
    }

    #[tokio::test]
    async fn test_already_cancelled_token_fails_before_searching() {
        let searcher = Arc::new(MockSearcher::new());
        let fetcher = Arc::new(MockFetcher::new());
        let pipeline = pipeline_with(searcher.clone(), fetcher, RuleTable::new());

        let token = CancellationToken::new();
        token.cancel("caller gave up");

        let err = pipeline.run("query", &token).await.unwrap_err();
        assert!(matches!(err, SiftError::Cancelled { .. }));
        assert_eq!(searcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_in_flight_fetches() {
        let searcher = Arc::new(MockSearcher::returning_hits(vec![SearchHit::new(
            "Slow", UNRULED,
        )]));
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_page(UNRULED, "<p>late</p>")
                .with_delay(UNRULED, Duration::from_secs(30)),
        );
        let pipeline = Arc::new(pipeline_with(searcher, fetcher, RuleTable::new()));

        let token = Arc::new(CancellationToken::new());
        let run_token = token.clone();
        let run_pipeline = pipeline.clone();
        let handle =
            tokio::spawn(async move { run_pipeline.run("slow", &run_token).await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel("deadline");

        let err = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("run must return promptly after cancel")
            .unwrap()
            .unwrap_err();

        assert!(matches!(err, SiftError::Cancelled { reason } if reason == "deadline"));
    }

    #[tokio::test]
    async fn test_malformed_total_results_is_terminal() {
        let searcher = Arc::new(MockSearcher::new());
        searcher.push_response(Ok({
            let mut response = crate::search::SearchResponse::from_hits(Vec::new());
            response.search_information.total_results = "not-a-number".to_string();
            response
        }));
        let fetcher = Arc::new(MockFetcher::new());
        let pipeline = pipeline_with(searcher, fetcher, RuleTable::new());

        let err = pipeline
            .run("query", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SiftError::MalformedResponse { .. }));
    }
}
