//! Services behind the tasks screen.

use crate::domain::task::Task;
use crate::domain::types::RecordId;
use crate::dto::{Labeled, ListPageData, ListQuery, SelectOption};
use crate::forms::tasks::AddTaskForm;
use crate::models::auth::AuthenticatedUser;
use crate::services::{
    ServiceResult, by_optional_date, matches_search, normalize_search, owner_of,
};
use crate::store::Store;

/// Tasks matching the search, by due date with undated tasks last.
pub fn load_tasks_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<ListPageData<Labeled<Task>>> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    let search_query = normalize_search(query.q);

    let mut items: Vec<_> = snapshot
        .tasks
        .iter()
        .filter(|task| {
            matches_search(
                search_query.as_deref(),
                &[&task.title, &task.assignee, task.status.as_str()],
            )
        })
        .map(|task| Labeled {
            event_label: task
                .event_id
                .as_ref()
                .map(|id| snapshot.event_label(id))
                .unwrap_or_default(),
            record: task.clone(),
        })
        .collect();
    items.sort_by(|a, b| by_optional_date(a.record.due_date, b.record.due_date));

    Ok(ListPageData {
        items,
        options: SelectOption::events(&snapshot),
        search_query,
    })
}

pub fn add_task(store: &Store, user: &AuthenticatedUser, form: AddTaskForm) -> ServiceResult<Task> {
    let owner = owner_of(user)?;
    let task = form.into_domain(owner.clone())?;
    Ok(store.create(&owner, task)?)
}

pub fn toggle_task(store: &Store, user: &AuthenticatedUser, id: &str) -> ServiceResult<Task> {
    let owner = owner_of(user)?;
    let id = RecordId::new(id)?;
    Ok(store.update_with::<Task>(&owner, &id, Task::toggle_done)?)
}

pub fn delete_task(store: &Store, user: &AuthenticatedUser, id: &str) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    store.remove::<Task>(&owner, &RecordId::new(id)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TaskStatus;
    use crate::services::test_support::{demo_store, user};

    #[test]
    fn undated_tasks_are_listed_last() {
        let store = demo_store();
        add_task(
            &store,
            &user(),
            AddTaskForm {
                id: Some("T-002".to_string()),
                title: "Renew insurance".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        add_task(
            &store,
            &user(),
            AddTaskForm {
                id: Some("T-003".to_string()),
                title: "Charge batteries".to_string(),
                due_date: Some("2026-02-13".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let page = load_tasks_page(&store, &user(), ListQuery::default()).unwrap();
        let ids: Vec<_> = page.items.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, vec!["T-001", "T-003", "T-002"]);
        assert_eq!(page.items[2].event_label, "");
    }

    #[test]
    fn toggle_marks_done_and_reopens() {
        let store = demo_store();
        assert_eq!(
            toggle_task(&store, &user(), "T-001").unwrap().status,
            TaskStatus::Done
        );
        assert_eq!(
            toggle_task(&store, &user(), "T-001").unwrap().status,
            TaskStatus::Todo
        );
    }
}
