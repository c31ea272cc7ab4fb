//! 磁盘数据库初始化测试

use savora_server::db::models::Food;
use savora_server::db::repository::FoodRepository;
use savora_server::{Config, ServerState};

#[tokio::test]
async fn initialize_creates_data_dirs_and_opens_db() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);

    let state = ServerState::initialize(&config).await.unwrap();

    assert!(dir.path().join("database").exists());
    assert!(dir.path().join("logs").exists());

    // 磁盘库可以读写
    let repo = FoodRepository::new(state.db.clone());
    let food = repo
        .create(Food {
            id: None,
            name: "Dumplings".to_string(),
            description: "Steamed".to_string(),
            image: String::new(),
            price: "6.50".parse().unwrap(),
            time_to_delivery: 15,
            available_count: 12,
            created_at: chrono::Utc::now(),
        })
        .await
        .unwrap();
    assert!(food.id.is_some());

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
}
