//! Integration tests for [`panel_storage::MySqlPanelStore`].
//!
//! Need a reachable MySQL server and are marked `#[ignore]`. Connection settings come from
//! MYSQL_TEST_HOST, MYSQL_TEST_PORT, MYSQL_TEST_USER, MYSQL_TEST_PASSWORD, MYSQL_TEST_DATABASE;
//! run with: `cargo test -p panel-storage --test mysql_store_test -- --ignored`

use std::env;

use panel_storage::{
    open_store, Backend, DatabaseConfig, MySqlPanelStore, MySqlSettings, PanelRecord, PanelStore,
    StorageError,
};

fn mysql_config() -> DatabaseConfig {
    DatabaseConfig::mysql(MySqlSettings {
        host: env::var("MYSQL_TEST_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        port: env::var("MYSQL_TEST_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3306),
        user: env::var("MYSQL_TEST_USER").unwrap_or_else(|_| "root".to_string()),
        password: env::var("MYSQL_TEST_PASSWORD").unwrap_or_default(),
        database: env::var("MYSQL_TEST_DATABASE").unwrap_or_else(|_| "panelbot_test".to_string()),
    })
}

/// Chat ids derived from the process id keep parallel runs against one server apart.
fn unique_chat() -> i64 {
    -(std::process::id() as i64) * 1000
}

#[tokio::test]
#[ignore] // Requires a MySQL server
async fn test_mysql_schema_init_is_idempotent() {
    let config = mysql_config();
    let store = MySqlPanelStore::from_config(&config);

    for _ in 0..3 {
        store.initialize_schema().await.unwrap();
    }
    assert_eq!(store.backend(), Backend::MySql);
}

#[tokio::test]
#[ignore] // Requires a MySQL server
async fn test_mysql_panel_lifecycle() {
    let store = open_store(&mysql_config()).await.unwrap();
    let chat = unique_chat();

    store
        .upsert_panel(&PanelRecord::new(chat, "a", "http://old", "t", "u", "p"))
        .await
        .unwrap();
    let latest = PanelRecord::new(chat, "a", "http://x", "t2", "u2", "p2");
    store.upsert_panel(&latest).await.unwrap();
    assert_eq!(store.list_panels(chat).await.unwrap(), vec![latest]);

    store.set_selected_panel(chat, "a").await.unwrap();
    assert_eq!(
        store.get_selected_panel(chat).await.unwrap(),
        Some("a".to_string())
    );

    assert!(store.delete_panel(chat, "a").await.unwrap());
    assert!(store.list_panels(chat).await.unwrap().is_empty());
    assert_eq!(store.get_selected_panel(chat).await.unwrap(), None);
    assert!(matches!(
        store.set_selected_panel(chat, "a").await,
        Err(StorageError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore] // Requires a MySQL server
async fn test_mysql_admins_and_log_channel() {
    let store = open_store(&mysql_config()).await.unwrap();
    let chat = unique_chat() - 1;

    store.add_admin(chat).await.unwrap();
    store.add_admin(chat).await.unwrap();
    assert_eq!(
        store.list_admins().await.unwrap().iter().filter(|id| **id == chat).count(),
        1
    );
    assert!(store.remove_admin(chat).await.unwrap());
    assert!(!store.remove_admin(chat).await.unwrap());

    store.set_log_channel(555).await.unwrap();
    store.set_log_channel(555).await.unwrap();
    assert_eq!(store.get_log_channel().await.unwrap(), Some(555));
}

/// **Test: Selecting a never-saved alias is NotFound and stores nothing.**
#[tokio::test]
#[ignore] // Requires a MySQL server
async fn test_mysql_select_missing_panel_is_not_found() {
    let store = open_store(&mysql_config()).await.unwrap();
    let chat = unique_chat() - 2;

    let err = store.set_selected_panel(chat, "ghost").await.unwrap_err();

    assert!(matches!(err, StorageError::NotFound(_)));
    assert_eq!(store.get_selected_panel(chat).await.unwrap(), None);
}

/// **Test: Racing select against delete never leaves a selection for a deleted panel.**
///
/// **Setup:** Panel "a" saved. **Action:** `set_selected_panel` and `delete_panel` concurrently, 20 rounds.
/// **Expected:** After each round the panel is gone and no selection remains.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires a MySQL server
async fn test_mysql_select_racing_delete_leaves_no_dangling_selection() {
    let store = open_store(&mysql_config()).await.unwrap();
    let chat = unique_chat() - 3;

    for _ in 0..20 {
        store
            .upsert_panel(&PanelRecord::new(chat, "a", "http://a", "", "", ""))
            .await
            .unwrap();
        let selector = {
            let store = store.clone();
            tokio::spawn(async move { store.set_selected_panel(chat, "a").await })
        };
        let deleter = {
            let store = store.clone();
            tokio::spawn(async move { store.delete_panel(chat, "a").await })
        };

        match selector.await.unwrap() {
            Ok(()) | Err(StorageError::NotFound(_)) => {}
            Err(e) => panic!("unexpected select error: {}", e),
        }
        assert!(deleter.await.unwrap().unwrap());

        assert!(store.get_panel(chat, "a").await.unwrap().is_none());
        assert_eq!(store.get_selected_panel(chat).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_mysql_unreachable_host_is_connection_error() {
    let mut config = mysql_config();
    config.mysql.host = "127.0.0.1".to_string();
    config.mysql.port = 1;
    config.mysql.user = "nobody".to_string();
    config.mysql.database = "nothing".to_string();

    let err = open_store(&config).await.err().expect("must fail");

    assert!(matches!(
        err,
        StorageError::Connection {
            backend: Backend::MySql,
            ..
        }
    ));
}
