//! Catalog store scenarios against a scripted backend

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use platform::testing::MockBackend;
    use platform::token::MemoryTokenStorage;
    use platform::{TokenVault, Transport};
    use serde_json::{Value, json};

    use crate::{CatalogStore, HttpCatalogGateway};

    pub type TestStore = CatalogStore<HttpCatalogGateway<MockBackend>>;

    pub fn store_with(backend: &MockBackend) -> TestStore {
        store_and_vault(backend).0
    }

    pub fn store_and_vault(backend: &MockBackend) -> (TestStore, Arc<TokenVault>) {
        let vault = Arc::new(TokenVault::rehydrate(MemoryTokenStorage::seeded("admin-token")));
        let transport = Arc::new(Transport::new(backend.clone(), vault.clone()));
        (CatalogStore::new(HttpCatalogGateway::new(transport)), vault)
    }

    pub fn problem_json(id: u64, title: &str, difficulty: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": format!("{title} description"),
            "problem_type": "dsa",
            "difficulty": difficulty,
            "problem_metadata": {"tags": ["arrays"]},
            "created_at": "2024-02-01T09:00:00Z"
        })
    }

    pub fn page(items: Vec<Value>) -> Value {
        let total = items.len();
        json!({"items": items, "total": total})
    }
}

#[cfg(test)]
mod fetch_tests {
    use super::support::*;
    use crate::{CatalogError, Difficulty, ProblemFilter, ProblemType};
    use http::Method;
    use kernel::id::ProblemId;
    use kernel::lifecycle::RequestStatus;
    use platform::testing::MockBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_all_replaces_list() {
        let backend = MockBackend::new();
        backend.reply(
            Method::GET,
            "/problems",
            200,
            page(vec![problem_json(1, "Two Sum", "easy"), problem_json(2, "3Sum", "medium")]),
        );
        backend.reply(Method::GET, "/problems", 200, page(vec![problem_json(3, "Trie", "hard")]));
        let store = store_with(&backend);

        store.fetch_all(&ProblemFilter::default()).await.unwrap();
        assert_eq!(store.problems().len(), 2);

        let filter = ProblemFilter::default().with_difficulty(Difficulty::Hard);
        let page = store.fetch_all(&filter).await.unwrap();

        let ids: Vec<_> = store.problems().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["3"]);
        assert_eq!(page.total, Some(1));
        assert_eq!(store.state().total, Some(1));
        assert_eq!(store.state().list.status(), RequestStatus::Succeeded);

        let sent = backend.last_request().unwrap();
        assert_eq!(sent.query, vec![("difficulty".to_string(), "hard".to_string())]);
    }

    #[tokio::test]
    async fn test_server_order_is_kept() {
        let backend = MockBackend::new();
        backend.reply(
            Method::GET,
            "/problems",
            200,
            json!([problem_json(9, "Zeta", "easy"), problem_json(1, "Alpha", "easy")]),
        );
        let store = store_with(&backend);

        store.fetch_all(&ProblemFilter::default()).await.unwrap();

        let titles: Vec<_> = store.problems().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
        assert_eq!(store.state().total, None);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems", 200, page(vec![problem_json(1, "Two Sum", "easy")]));
        backend.reply(Method::GET, "/problems", 503, json!({"detail": "Service unavailable"}));
        let store = store_with(&backend);

        store.fetch_all(&ProblemFilter::default()).await.unwrap();
        let err = store.fetch_all(&ProblemFilter::default()).await.unwrap_err();

        assert_eq!(err.message(), "Service unavailable");
        let state = store.state();
        assert_eq!(state.problems.len(), 1);
        assert_eq!(state.list.status(), RequestStatus::Failed);
        assert_eq!(state.list.error(), Some("Service unavailable"));
    }

    #[tokio::test]
    async fn test_expired_session_keeps_previous_list() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems", 200, page(vec![problem_json(1, "Two Sum", "easy")]));
        backend.reply(Method::GET, "/problems", 401, json!({"detail": "Could not validate credentials"}));
        let (store, vault) = store_and_vault(&backend);
        let mut signals = vault.signals();

        store.fetch_all(&ProblemFilter::default()).await.unwrap();
        let err = store.fetch_all(&ProblemFilter::default()).await.unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Transport(platform::TransportError::SessionInvalidated { .. })
        ));
        assert_eq!(backend.requests()[0].bearer_token(), Some("admin-token"));
        assert!(vault.token().is_none());
        assert!(signals.try_recv().is_ok());
        assert_eq!(store.problems().len(), 1);
        assert_eq!(store.state().list.status(), RequestStatus::Failed);
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_a_decode_failure() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems", 200, json!({"unexpected": true}));
        let store = store_with(&backend);

        let err = store.fetch_all(&ProblemFilter::default()).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Transport(platform::TransportError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_most_recently_issued_fetch_wins() {
        let backend = MockBackend::new();
        let easy_gate = backend.gate(Method::GET, "/problems");
        let hard_gate = backend.gate(Method::GET, "/problems");
        let store = store_with(&backend);

        let easy = ProblemFilter::default().with_difficulty(Difficulty::Easy);
        let hard = ProblemFilter::default().with_difficulty(Difficulty::Hard);

        let (easy_result, hard_result, ()) = tokio::join!(
            store.fetch_all(&easy),
            store.fetch_all(&hard),
            async {
                tokio::task::yield_now().await;
                // HARD was issued second but resolves first.
                hard_gate.open(200, page(vec![problem_json(2, "Hard one", "hard")]));
                tokio::task::yield_now().await;
                easy_gate.open(200, page(vec![problem_json(1, "Easy one", "easy")]));
            }
        );

        assert_eq!(easy_result.unwrap_err(), CatalogError::Superseded);
        assert_eq!(hard_result.unwrap().items[0].difficulty, Difficulty::Hard);

        let state = store.state();
        assert_eq!(state.problems.len(), 1);
        assert_eq!(state.problems[0].difficulty, Difficulty::Hard);
        assert_eq!(state.list.status(), RequestStatus::Succeeded);

        let sent = backend.requests();
        assert_eq!(sent[0].query, vec![("difficulty".to_string(), "easy".to_string())]);
        assert_eq!(sent[1].query, vec![("difficulty".to_string(), "hard".to_string())]);
    }

    #[tokio::test]
    async fn test_superseded_failure_does_not_touch_state() {
        let backend = MockBackend::new();
        let first = backend.gate(Method::GET, "/problems");
        backend.reply(Method::GET, "/problems", 200, page(vec![problem_json(5, "Graph", "medium")]));
        let store = store_with(&backend);
        let any = ProblemFilter::default();
        let dsa = ProblemFilter::default().with_type(ProblemType::Dsa);

        let (stale, fresh, ()) = tokio::join!(
            store.fetch_all(&any),
            store.fetch_all(&dsa),
            async {
                tokio::task::yield_now().await;
                first.fail("connection reset");
            }
        );

        assert!(stale.unwrap_err().is_superseded());
        fresh.unwrap();
        let state = store.state();
        assert_eq!(state.list.status(), RequestStatus::Succeeded);
        assert!(state.list.error().is_none());
        assert_eq!(state.problems.len(), 1);
    }

    #[tokio::test]
    async fn test_abandoned_fetch_is_dropped() {
        let backend = MockBackend::new();
        let gate = backend.gate(Method::GET, "/problems");
        let store = store_with(&backend);
        let filter = ProblemFilter::default();

        let (result, ()) = tokio::join!(store.fetch_all(&filter), async {
            tokio::task::yield_now().await;
            assert!(store.state().list.is_loading());
            store.abandon_pending();
            gate.open(200, page(vec![problem_json(1, "Two Sum", "easy")]));
        });

        assert_eq!(result.unwrap_err(), CatalogError::Superseded);
        assert!(store.problems().is_empty());
        assert_eq!(store.state().list.status(), RequestStatus::Idle);
    }

    #[tokio::test]
    async fn test_fetch_one_sets_current_without_touching_list() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems", 200, page(vec![problem_json(1, "Two Sum", "easy")]));
        backend.reply(Method::GET, "/problems/7", 200, json!({"id": 7, "title": "LRU", "problem_type": "lld"}));
        let store = store_with(&backend);

        store.fetch_all(&ProblemFilter::default()).await.unwrap();
        let problem = store.fetch_one(&ProblemId::new("7")).await.unwrap();

        assert_eq!(problem.problem_type, ProblemType::Lld);
        assert_eq!(problem.difficulty, Difficulty::Medium);
        assert_eq!(store.current_problem(), Some(problem));
        assert_eq!(store.problems().len(), 1);
    }

    #[test]
    fn test_fetch_one_in_flight_keeps_previous_current() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems/1", 200, problem_json(1, "Two Sum", "easy"));
        let gate = backend.gate(Method::GET, "/problems/2");
        let store = store_with(&backend);

        let first = tokio_test::block_on(store.fetch_one(&ProblemId::new("1"))).unwrap();

        let id = ProblemId::new("2");
        let mut second = tokio_test::task::spawn(store.fetch_one(&id));
        tokio_test::assert_pending!(second.poll());
        assert!(store.state().detail.is_loading());
        assert_eq!(store.current_problem(), Some(first));

        gate.open(200, problem_json(2, "3Sum", "medium"));
        let problem = tokio_test::assert_ready_ok!(second.poll());
        assert_eq!(store.current_problem(), Some(problem));
    }

    #[tokio::test]
    async fn test_fetch_one_not_found() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems/404", 404, json!({"detail": "Problem not found"}));
        let store = store_with(&backend);

        let err = store.fetch_one(&ProblemId::new("404")).await.unwrap_err();

        assert_eq!(err.message(), "Problem not found");
        assert!(store.current_problem().is_none());
        assert_eq!(store.state().detail.error(), Some("Problem not found"));
    }
}

#[cfg(test)]
mod filter_tests {
    use super::support::*;
    use crate::{Difficulty, ProblemFilter};
    use http::Method;
    use platform::testing::MockBackend;

    #[tokio::test]
    async fn test_visible_problems_use_client_predicate() {
        let backend = MockBackend::new();
        backend.reply(
            Method::GET,
            "/problems",
            200,
            page(vec![
                problem_json(1, "Two Sum", "easy"),
                problem_json(2, "Word Search", "medium"),
                problem_json(3, "Median of Two Arrays", "hard"),
            ]),
        );
        let store = store_with(&backend);
        store.fetch_all(&ProblemFilter::default()).await.unwrap();

        store.set_filter(ProblemFilter::default().with_search("TWO"));
        let titles: Vec<_> = store.visible_problems().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Two Sum", "Median of Two Arrays"]);

        store.set_filter(
            ProblemFilter::default()
                .with_search("two")
                .with_difficulty(Difficulty::Hard),
        );
        assert_eq!(store.visible_problems().len(), 1);

        store.set_filter(ProblemFilter::default().with_tag("graphs"));
        assert!(store.visible_problems().is_empty());

        store.clear_filters();
        assert!(store.filter().is_empty());
        assert_eq!(store.visible_problems().len(), 3);
        // filtering never refetches
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_uses_stored_filter() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems", 200, page(vec![]));
        let store = store_with(&backend);

        store.set_filter(ProblemFilter::default().with_search("tree"));
        store.refresh().await.unwrap();

        assert_eq!(
            backend.last_request().unwrap().query,
            vec![("search".to_string(), "tree".to_string())]
        );
    }
}

#[cfg(test)]
mod manage_tests {
    use super::support::*;
    use crate::{CatalogError, Difficulty, ProblemDraft, ProblemFilter, ProblemPatch, ProblemType};
    use http::Method;
    use kernel::id::ProblemId;
    use platform::RequestBody;
    use platform::testing::MockBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_sends_wire_shape() {
        let backend = MockBackend::new();
        backend.reply(
            Method::POST,
            "/problems",
            200,
            json!({"id": 11, "title": "Parking Lot", "description": "Design it", "problem_type": "lld", "difficulty": "medium"}),
        );
        let store = store_with(&backend);

        let mut draft = ProblemDraft::new("Parking Lot", "Design it", ProblemType::Lld, Difficulty::Medium);
        draft.tags.insert("oop".to_string());
        let created = store.create(&draft).await.unwrap();

        assert_eq!(created.id.as_str(), "11");
        assert_eq!(store.current_problem(), Some(created));
        assert!(store.problems().is_empty());

        let RequestBody::Json(body) = backend.last_request().unwrap().body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["problem_type"], "lld");
        assert_eq!(body["difficulty"], "medium");
        assert_eq!(body["problem_metadata"]["tags"], json!(["oop"]));
        assert!(body.get("type").is_none());
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let backend = MockBackend::new();
        let store = store_with(&backend);

        let draft = ProblemDraft::new("", "Design it", ProblemType::Lld, Difficulty::Medium);
        let err = store.create(&draft).await.unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let backend = MockBackend::new();
        backend.reply(
            Method::PUT,
            "/problems/11",
            200,
            json!({"id": 11, "title": "Parking Lot", "problem_type": "lld", "difficulty": "hard"}),
        );
        let store = store_with(&backend);

        let patch = ProblemPatch {
            difficulty: Some(Difficulty::Hard),
            ..ProblemPatch::default()
        };
        let updated = store.update(&ProblemId::new("11"), &patch).await.unwrap();

        assert_eq!(updated.difficulty, Difficulty::Hard);
        let sent = backend.last_request().unwrap();
        assert_eq!(sent.body, RequestBody::Json(json!({"difficulty": "hard"})));
    }

    #[tokio::test]
    async fn test_forbidden_mutation_records_error() {
        let backend = MockBackend::new();
        backend.reply(Method::DELETE, "/problems/3", 403, json!({"detail": "Not enough permissions"}));
        let store = store_with(&backend);

        let err = store.delete(&ProblemId::new("3")).await.unwrap_err();

        assert_eq!(err.message(), "Not enough permissions");
        assert_eq!(store.state().mutation.error(), Some("Not enough permissions"));
    }

    #[tokio::test]
    async fn test_delete_clears_matching_current_problem_only() {
        let backend = MockBackend::new();
        backend.reply(Method::GET, "/problems", 200, page(vec![problem_json(3, "Heap", "easy")]));
        backend.reply(Method::GET, "/problems/3", 200, problem_json(3, "Heap", "easy"));
        backend.reply(Method::DELETE, "/problems/4", 200, problem_json(4, "Other", "easy"));
        backend.reply(Method::DELETE, "/problems/3", 200, problem_json(3, "Heap", "easy"));
        let store = store_with(&backend);

        store.fetch_all(&ProblemFilter::default()).await.unwrap();
        store.fetch_one(&ProblemId::new("3")).await.unwrap();

        store.delete(&ProblemId::new("4")).await.unwrap();
        assert!(store.current_problem().is_some());

        store.delete(&ProblemId::new("3")).await.unwrap();
        assert!(store.current_problem().is_none());
        // the list is only replaced by a refetch
        assert_eq!(store.problems().len(), 1);
    }
}
