// PostgreSQL menu repository against a live database.
//
// Needs DATABASE_URL pointing at a server where the user may create
// databases; each test gets a fresh one with the migrations applied.
//   cargo test -p menu-infrastructure --test pg_menu_repo_test -- --ignored

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use menu_core::domain::{CreateMenuInput, MenuNode, OrderAssignment};
use menu_core::repositories::{AtomicOperation, MenuFilter, MenuRepository};
use menu_core::{DomainError, MenuService};
use menu_infrastructure::PgMenuRepository;

fn menu(name: &str, parent_id: Option<Uuid>, order: i32) -> MenuNode {
    let mut input = CreateMenuInput::named(name).with_order(order);
    input.parent_id = parent_id;
    MenuNode::new(input)
}

fn names(menus: &[MenuNode]) -> Vec<&str> {
    menus.iter().map(|m| m.name.as_str()).collect()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_many_filters_and_ordering(pool: PgPool) {
    let repo = PgMenuRepository::new(pool);
    let settings = repo.create(&menu("Settings", None, 2)).await.unwrap();
    repo.create(&menu("Dashboard", None, 1)).await.unwrap();
    let general = repo.create(&menu("General", Some(settings.id), 1)).await.unwrap();
    repo.create(&menu("Security", Some(settings.id), 0)).await.unwrap();

    let roots = repo.find_many(&MenuFilter::children_of(None)).await.unwrap();
    assert_eq!(names(&roots), vec!["Dashboard", "Settings"]);

    let children = repo.find_many(&MenuFilter::children_of(Some(settings.id))).await.unwrap();
    assert_eq!(names(&children), vec!["Security", "General"]);

    let clash = repo
        .find_many(&MenuFilter::sibling_named(Some(settings.id), "General", None))
        .await
        .unwrap();
    assert_eq!(clash.len(), 1);
    let excluded = repo
        .find_many(&MenuFilter::sibling_named(Some(settings.id), "General", Some(general.id)))
        .await
        .unwrap();
    assert!(excluded.is_empty());

    assert_eq!(repo.find_many(&MenuFilter::all()).await.unwrap().len(), 4);
    assert!(repo.find_by_id(&Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo.ping().await.is_ok());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_constraint_violations_map_to_domain_errors(pool: PgPool) {
    let repo = PgMenuRepository::new(pool);
    let settings = repo.create(&menu("Settings", None, 0)).await.unwrap();

    // unique sibling name, root group included
    let dup_root = repo.create(&menu("Settings", None, 1)).await.unwrap_err();
    assert!(matches!(dup_root, DomainError::NameConflict { parent_id: None, .. }));

    repo.create(&menu("General", Some(settings.id), 0)).await.unwrap();
    let dup_child = repo.create(&menu("General", Some(settings.id), 1)).await.unwrap_err();
    assert!(matches!(dup_child, DomainError::NameConflict { .. }));

    let missing = Uuid::new_v4();
    let orphan = repo.create(&menu("Lost", Some(missing), 0)).await.unwrap_err();
    assert!(matches!(orphan, DomainError::ParentNotFound(id) if id == missing));

    // parent with a child is held by the foreign key
    assert!(matches!(
        repo.delete(&settings.id).await,
        Err(DomainError::DatabaseError(_))
    ));
    assert!(matches!(
        repo.delete(&Uuid::new_v4()).await,
        Err(DomainError::MenuNotFound(_))
    ));
    assert!(matches!(
        repo.update(&menu("Ghost", None, 0)).await,
        Err(DomainError::MenuNotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_keeps_creation_time(pool: PgPool) {
    let repo = PgMenuRepository::new(pool);
    let created = repo.create(&menu("Settings", None, 0)).await.unwrap();

    let mut changed = created.clone();
    changed.name = "Preferences".to_string();
    let saved = repo.update(&changed).await.unwrap();

    assert_eq!(saved.name, "Preferences");
    assert_eq!(saved.created_at, created.created_at);
    assert!(saved.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_run_atomic_rolls_back_whole_batch(pool: PgPool) {
    let repo = PgMenuRepository::new(pool);
    let x = repo.create(&menu("X", None, 0)).await.unwrap();
    let y = repo.create(&menu("Y", None, 1)).await.unwrap();

    let err = repo
        .run_atomic(vec![
            AtomicOperation::SetOrder { id: x.id, order: 5 },
            AtomicOperation::SetOrder { id: Uuid::new_v4(), order: 6 },
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MenuNotFound(_)));
    assert_eq!(repo.find_by_id(&x.id).await.unwrap().unwrap().order, 0);

    // deleting x succeeds inside the batch, then the failing step undoes it
    let err = repo
        .run_atomic(vec![
            AtomicOperation::Delete(x.id),
            AtomicOperation::Delete(Uuid::new_v4()),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MenuNotFound(_)));
    assert!(repo.find_by_id(&x.id).await.unwrap().is_some());

    repo.run_atomic(vec![
        AtomicOperation::SetOrder { id: x.id, order: 1 },
        AtomicOperation::SetOrder { id: y.id, order: 0 },
    ])
    .await
    .unwrap();
    let roots = repo.find_many(&MenuFilter::all()).await.unwrap();
    assert_eq!(names(&roots), vec!["Y", "X"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_service_reorder_and_clear_on_postgres(pool: PgPool) {
    let service = MenuService::new(Arc::new(PgMenuRepository::new(pool)));
    let parent = service.create(CreateMenuInput::named("Parent")).await.unwrap();
    let x = service
        .create(CreateMenuInput::named("X").under(parent.id).with_order(0))
        .await
        .unwrap();
    let y = service
        .create(CreateMenuInput::named("Y").under(parent.id).with_order(1))
        .await
        .unwrap();

    let reordered = service
        .reorder_siblings(
            Some(parent.id),
            vec![
                OrderAssignment { id: x.id, order: 2 },
                OrderAssignment { id: y.id, order: 1 },
            ],
        )
        .await
        .unwrap();
    assert_eq!(names(&reordered), vec!["Y", "X"]);

    let rejected = service
        .reorder_siblings(Some(parent.id), vec![OrderAssignment { id: x.id, order: 0 }])
        .await
        .unwrap_err();
    assert!(matches!(rejected, DomainError::ReorderMismatch(_)));
    assert_eq!(service.get_one(x.id).await.unwrap().order, 2);

    // children go before parents, so the foreign key never objects
    assert_eq!(service.clear_all().await.unwrap(), 3);
    assert!(service.list_tree().await.unwrap().is_empty());
}
