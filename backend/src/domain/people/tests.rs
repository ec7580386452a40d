//! Tests for the person services: identity guard, friendship engine, and
//! the person cascade.

use std::sync::Arc;

use mockall::predicate::eq;

use super::PeopleService;
use crate::domain::ports::{
    MockPersonStore, MockPostStore, PeopleCommand, PeopleQuery, PersonStore, PersonStoreError,
    PostStore, PostStoreError,
};
use crate::domain::{EntityId, ErrorCode, Person, PersonDraft, PersonPatch, PostDraft};
use crate::outbound::memory::MemoryStore;

fn memory_service() -> (Arc<MemoryStore>, PeopleService<MemoryStore, MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (store.clone(), PeopleService::new(store.clone(), store))
}

fn draft(handle: &str, address: &str) -> PersonDraft {
    PersonDraft {
        handle: handle.to_owned(),
        address: address.to_owned(),
    }
}

fn sample_person(handle: &str) -> Person {
    Person {
        id: EntityId::generate(),
        handle: handle.to_owned(),
        address: format!("{handle}@x.com"),
        posts: vec![],
        friends: vec![],
    }
}

async fn create(service: &impl PeopleCommand, handle: &str) -> Person {
    service
        .create_person(draft(handle, &format!("{handle}@x.com")))
        .await
        .expect("create person")
}

#[tokio::test]
async fn create_person_conflicts_on_duplicate_handle() {
    let (_, service) = memory_service();
    create(&service, "ada").await;

    let error = service
        .create_person(draft("ada", "other@x.com"))
        .await
        .expect_err("duplicate handle");
    assert_eq!(error.code(), ErrorCode::Conflict);
    let details = error.details().expect("details");
    assert_eq!(details["fields"], serde_json::json!(["handle"]));

    // No second record was created.
    assert_eq!(service.list_people().await.expect("list").len(), 1);
}

#[tokio::test]
async fn create_person_maps_the_store_backstop_to_the_same_conflict() {
    let mut people = MockPersonStore::new();
    people
        .expect_find_by_identity()
        .times(1)
        .return_once(|_, _| Ok(None));
    people.expect_create().times(1).return_once(|_| {
        Err(PersonStoreError::duplicate_identity(vec!["handle"]))
    });
    let service = PeopleService::new(Arc::new(people), Arc::new(MockPostStore::new()));

    let error = service
        .create_person(draft("ada", "ada@x.com"))
        .await
        .expect_err("race lost");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn create_person_reports_field_violations() {
    let (_, service) = memory_service();
    let error = service
        .create_person(draft("  ", "not-an-address"))
        .await
        .expect_err("invalid draft");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let violations = error.details().expect("details")["violations"]
        .as_array()
        .expect("violations")
        .clone();
    assert_eq!(violations.len(), 2);
}

#[tokio::test]
async fn add_friend_records_a_symmetric_edge() {
    let (_, service) = memory_service();
    let ada = create(&service, "ada").await;
    let bob = create(&service, "bob").await;

    let updated = service
        .add_friend(&ada.id, &bob.id)
        .await
        .expect("add friend");
    assert!(updated.has_friend(&bob.id));
    assert_eq!(updated.friend_count(), 1);

    let bob_profile = service.get_person(&bob.id).await.expect("get bob");
    assert!(bob_profile.person.has_friend(&ada.id));

    // Repeating the call is idempotent on both sides.
    let repeated = service
        .add_friend(&ada.id, &bob.id)
        .await
        .expect("repeat add");
    assert_eq!(repeated.friend_count(), 1);
    let bob_again = service.get_person(&bob.id).await.expect("get bob");
    assert_eq!(bob_again.person.friend_count(), 1);
}

#[tokio::test]
async fn add_friend_rejects_self_friendship() {
    let (_, service) = memory_service();
    let ada = create(&service, "ada").await;

    let error = service
        .add_friend(&ada.id, &ada.id)
        .await
        .expect_err("self friendship");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);

    let profile = service.get_person(&ada.id).await.expect("get ada");
    assert_eq!(profile.person.friend_count(), 0);
}

#[tokio::test]
async fn add_friend_fails_not_found_without_mutating_anything() {
    let (_, service) = memory_service();
    let ada = create(&service, "ada").await;

    let error = service
        .add_friend(&ada.id, &EntityId::generate())
        .await
        .expect_err("missing friend");
    assert_eq!(error.code(), ErrorCode::NotFound);

    let profile = service.get_person(&ada.id).await.expect("get ada");
    assert_eq!(profile.person.friend_count(), 0);
}

#[tokio::test]
async fn add_friend_reports_a_partial_failure_when_the_friend_vanishes() {
    let person = sample_person("ada");
    let friend = sample_person("bob");
    let person_id = person.id;
    let friend_id = friend.id;

    let mut people = MockPersonStore::new();
    people
        .expect_find_by_id()
        .with(eq(friend_id))
        .times(1)
        .return_once(move |_| Ok(Some(friend)));
    people
        .expect_insert_friend_ref()
        .with(eq(person_id), eq(friend_id))
        .times(1)
        .return_once(move |_, _| Ok(Some(person)));
    // The friend was deleted between the existence check and the reverse
    // edge update.
    people
        .expect_insert_friend_ref()
        .with(eq(friend_id), eq(person_id))
        .times(1)
        .return_once(|_, _| Ok(None));
    let service = PeopleService::new(Arc::new(people), Arc::new(MockPostStore::new()));

    let error = service
        .add_friend(&person_id, &friend_id)
        .await
        .expect_err("partial");
    assert_eq!(error.code(), ErrorCode::PartialFailure);
    let details = error.details().expect("details");
    assert_eq!(details["completed"], serde_json::json!(["forward_edge"]));
    assert_eq!(details["failed"], "reverse_edge");
}

#[tokio::test]
async fn remove_friend_removes_both_sides_and_is_idempotent() {
    let (_, service) = memory_service();
    let ada = create(&service, "ada").await;
    let bob = create(&service, "bob").await;
    service
        .add_friend(&ada.id, &bob.id)
        .await
        .expect("add friend");

    let updated = service
        .remove_friend(&ada.id, &bob.id)
        .await
        .expect("remove friend");
    assert_eq!(updated.friend_count(), 0);
    let bob_profile = service.get_person(&bob.id).await.expect("get bob");
    assert_eq!(bob_profile.person.friend_count(), 0);

    // Removing an edge that does not exist is success, not NotFound.
    let repeated = service
        .remove_friend(&ada.id, &bob.id)
        .await
        .expect("repeat remove");
    assert_eq!(repeated.friend_count(), 0);
}

#[tokio::test]
async fn remove_friend_requires_the_first_person_to_exist() {
    let (_, service) = memory_service();
    let ada = create(&service, "ada").await;

    let error = service
        .remove_friend(&EntityId::generate(), &ada.id)
        .await
        .expect_err("missing person");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn remove_friend_succeeds_when_the_friend_document_is_gone() {
    let person = sample_person("ada");
    let person_id = person.id;
    let friend_id = EntityId::generate();

    let mut people = MockPersonStore::new();
    people
        .expect_remove_friend_ref()
        .with(eq(person_id), eq(friend_id))
        .times(1)
        .return_once(move |_, _| Ok(Some(person)));
    // The friend was deleted after the edge was formed; a missing document
    // carries no edge, so that side is already clean.
    people
        .expect_remove_friend_ref()
        .with(eq(friend_id), eq(person_id))
        .times(1)
        .return_once(|_, _| Ok(None));
    let service = PeopleService::new(Arc::new(people), Arc::new(MockPostStore::new()));

    let updated = service
        .remove_friend(&person_id, &friend_id)
        .await
        .expect("removal succeeds");
    assert_eq!(updated.id, person_id);
    assert!(updated.friends.is_empty());
}

#[tokio::test]
async fn delete_person_cascades_posts_and_friend_references() {
    let (store, service) = memory_service();
    let ada = create(&service, "ada").await;
    let bob = create(&service, "bob").await;
    service
        .add_friend(&bob.id, &ada.id)
        .await
        .expect("add friend");

    let post = PostStore::create(
        store.as_ref(),
        PostDraft {
            body: "hello".to_owned(),
            author_handle: "ada".to_owned(),
        },
    )
    .await
    .expect("create post");
    store
        .insert_post_ref(&ada.id, &post.id)
        .await
        .expect("link post");

    let deletion = service.delete_person(&ada.id).await.expect("delete ada");
    assert_eq!(deletion.person_id, ada.id);
    assert_eq!(deletion.posts_deleted, 1);
    assert_eq!(deletion.friend_references_removed, 1);

    assert!(PostStore::find_by_id(store.as_ref(), &post.id)
        .await
        .expect("post lookup")
        .is_none());
    let bob_profile = service.get_person(&bob.id).await.expect("get bob");
    assert_eq!(bob_profile.person.friend_count(), 0);
    assert_eq!(service.list_people().await.expect("list").len(), 1);
}

#[tokio::test]
async fn delete_person_fails_not_found_for_unknown_identifiers() {
    let (_, service) = memory_service();
    let error = service
        .delete_person(&EntityId::generate())
        .await
        .expect_err("unknown person");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_person_names_the_completed_steps_when_posts_fail() {
    let person = sample_person("ada");
    let person_id = person.id;
    let mut people = MockPersonStore::new();
    people
        .expect_delete()
        .with(eq(person_id))
        .times(1)
        .return_once(move |_| Ok(Some(person)));
    let mut posts = MockPostStore::new();
    posts
        .expect_delete_many()
        .times(1)
        .return_once(|_| Err(PostStoreError::connection("store gone")));
    let service = PeopleService::new(Arc::new(people), Arc::new(posts));

    let error = service
        .delete_person(&person_id)
        .await
        .expect_err("partial");
    assert_eq!(error.code(), ErrorCode::PartialFailure);
    let details = error.details().expect("details");
    assert_eq!(details["completed"], serde_json::json!(["person_record"]));
    assert_eq!(details["failed"], "posts");
}

#[tokio::test]
async fn delete_person_names_the_completed_steps_when_pruning_fails() {
    let person = sample_person("ada");
    let person_id = person.id;
    let mut people = MockPersonStore::new();
    people
        .expect_delete()
        .with(eq(person_id))
        .times(1)
        .return_once(move |_| Ok(Some(person)));
    people
        .expect_remove_friend_ref_from_all()
        .times(1)
        .return_once(|_| Err(PersonStoreError::query("index scan failed")));
    let mut posts = MockPostStore::new();
    posts.expect_delete_many().times(1).return_once(|_| Ok(0));
    let service = PeopleService::new(Arc::new(people), Arc::new(posts));

    let error = service
        .delete_person(&person_id)
        .await
        .expect_err("partial");
    assert_eq!(error.code(), ErrorCode::PartialFailure);
    let details = error.details().expect("details");
    assert_eq!(
        details["completed"],
        serde_json::json!(["person_record", "posts"])
    );
    assert_eq!(details["failed"], "friend_references");
}

#[tokio::test]
async fn get_person_resolves_references_and_skips_dangling_ones() {
    let (store, service) = memory_service();
    let ada = create(&service, "ada").await;
    let bob = create(&service, "bob").await;
    service
        .add_friend(&ada.id, &bob.id)
        .await
        .expect("add friend");

    // A post reference whose target is gone must not fail the read.
    store
        .insert_post_ref(&ada.id, &EntityId::generate())
        .await
        .expect("dangling post ref");

    let profile = service.get_person(&ada.id).await.expect("get ada");
    assert_eq!(profile.friends.len(), 1);
    assert_eq!(profile.friends[0].id, bob.id);
    assert!(profile.posts.is_empty());
}

#[tokio::test]
async fn update_person_rejects_empty_patches_and_unknown_targets() {
    let (_, service) = memory_service();
    let ada = create(&service, "ada").await;

    let error = service
        .update_person(&ada.id, PersonPatch::default())
        .await
        .expect_err("empty patch");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);

    let error = service
        .update_person(
            &EntityId::generate(),
            PersonPatch {
                handle: Some("grace".to_owned()),
                address: None,
            },
        )
        .await
        .expect_err("unknown target");
    assert_eq!(error.code(), ErrorCode::NotFound);

    let updated = service
        .update_person(
            &ada.id,
            PersonPatch {
                handle: Some("countess".to_owned()),
                address: None,
            },
        )
        .await
        .expect("update handle");
    assert_eq!(updated.handle, "countess");
}

#[tokio::test]
async fn store_connection_failures_surface_as_unavailability() {
    let mut people = MockPersonStore::new();
    people
        .expect_list()
        .times(1)
        .return_once(|| Err(PersonStoreError::connection("refused")));
    let service = PeopleService::new(Arc::new(people), Arc::new(MockPostStore::new()));

    let error = service.list_people().await.expect_err("unavailable");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
