//! In-memory directory backed by concurrent maps.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use oracle_shared::UserStatus;

use super::ports::{
    DirectoryError, DirectoryRepo, NewRole, NewUser, RoleRecord, SkillRecord, UserRecord,
};

const SEED_SUPERVISORS: [&str; 3] = ["Arvind", "Arun", "Athira"];
const SEED_SKILLS: [&str; 3] = ["Customer Support", "Billing", "Technical Escalation"];

/// Users keyed by username, roles keyed by name, skills keyed by id.
pub struct MemoryDirectory {
    users: DashMap<String, UserRecord>,
    roles: DashMap<String, RoleRecord>,
    skills: DashMap<u64, SkillRecord>,
    next_user_id: AtomicU64,
    next_role_id: AtomicU64,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            roles: DashMap::new(),
            skills: DashMap::new(),
            next_user_id: AtomicU64::new(1),
            next_role_id: AtomicU64::new(1),
        }
    }

    /// Directory with the stock supervisors (ids 1..=3, no password, so they
    /// cannot log in), the stock skills, and one admin account.
    pub fn seeded(admin_user: &str, admin_password: &str, now: DateTime<Utc>) -> Self {
        let directory = Self::new();

        let supervisors = SEED_SUPERVISORS.map(|name| NewUser {
            username: name.to_string(),
            password: String::new(),
            firstname: name.to_string(),
            lastname: String::new(),
            supervisor_id: String::new(),
            user_start_date: String::new(),
            user_end_date: String::new(),
            user_status: UserStatus::Active,
            skill_id: String::new(),
            is_supervisor: true,
        });
        let admin = NewUser {
            username: admin_user.to_string(),
            password: admin_password.to_string(),
            firstname: "Administrator".to_string(),
            is_supervisor: false,
            ..supervisors[0].clone()
        };
        for user in supervisors.into_iter().chain(std::iter::once(admin)) {
            if let Err(e) = directory.insert_user_now(user, now) {
                tracing::warn!(error = %e, "Skipping seed user");
            }
        }
        for (skill_id, name) in (1u64..).zip(SEED_SKILLS) {
            directory.skills.insert(
                skill_id,
                SkillRecord {
                    skill_id,
                    skill_name: name.to_string(),
                },
            );
        }

        tracing::debug!(
            users = directory.users.len(),
            skills = directory.skills.len(),
            "Seeded in-memory directory"
        );
        directory
    }

    fn insert_user_now(
        &self,
        user: NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<UserRecord, DirectoryError> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(DirectoryError::DuplicateUser(user.username)),
            Entry::Vacant(slot) => {
                let record = UserRecord {
                    user_id: self.next_user_id.fetch_add(1, Ordering::Relaxed),
                    username: user.username,
                    password: user.password,
                    firstname: user.firstname,
                    lastname: user.lastname,
                    supervisor_id: user.supervisor_id,
                    user_start_date: user.user_start_date,
                    user_end_date: user.user_end_date,
                    user_status: user.user_status,
                    skill_id: user.skill_id,
                    is_supervisor: user.is_supervisor,
                    created_at,
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryRepo for MemoryDirectory {
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    async fn list_supervisors(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let mut supervisors: Vec<UserRecord> = self
            .users
            .iter()
            .filter(|entry| entry.is_supervisor)
            .map(|entry| entry.value().clone())
            .collect();
        supervisors.sort_by_key(|user| user.user_id);
        Ok(supervisors)
    }

    async fn list_skills(&self) -> Result<Vec<SkillRecord>, DirectoryError> {
        let mut skills: Vec<SkillRecord> =
            self.skills.iter().map(|entry| entry.value().clone()).collect();
        skills.sort_by_key(|skill| skill.skill_id);
        Ok(skills)
    }

    async fn insert_user(
        &self,
        user: NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<UserRecord, DirectoryError> {
        self.insert_user_now(user, created_at)
    }

    async fn insert_role(
        &self,
        role: NewRole,
        created_at: DateTime<Utc>,
    ) -> Result<RoleRecord, DirectoryError> {
        match self.roles.entry(role.role_name.clone()) {
            Entry::Occupied(_) => Err(DirectoryError::DuplicateRole(role.role_name)),
            Entry::Vacant(slot) => {
                let record = RoleRecord {
                    role_id: self.next_role_id.fetch_add(1, Ordering::Relaxed),
                    role_name: role.role_name,
                    role_description: role.role_description,
                    role_start_date: role.role_start_date,
                    role_end_date: role.role_end_date,
                    created_at,
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "pw".to_string(),
            firstname: "First".to_string(),
            lastname: String::new(),
            supervisor_id: "1".to_string(),
            user_start_date: String::new(),
            user_end_date: String::new(),
            user_status: UserStatus::Active,
            skill_id: "2".to_string(),
            is_supervisor: false,
        }
    }

    #[tokio::test]
    async fn seeded_supervisors_keep_their_ids_in_order() {
        let directory = MemoryDirectory::seeded("admin", "admin", Utc::now());

        let supervisors = directory.list_supervisors().await.expect("list");
        let listed: Vec<(u64, &str)> = supervisors
            .iter()
            .map(|u| (u.user_id, u.username.as_str()))
            .collect();
        assert_eq!(listed, vec![(1, "Arvind"), (2, "Arun"), (3, "Athira")]);

        let skills = directory.list_skills().await.expect("list");
        assert_eq!(skills.len(), SEED_SKILLS.len());
        assert_eq!(skills[0].skill_id, 1);
    }

    #[tokio::test]
    async fn admin_is_not_a_supervisor() {
        let directory = MemoryDirectory::seeded("root", "secret", Utc::now());
        let admin = directory
            .find_user("root")
            .await
            .expect("lookup")
            .expect("seeded admin");
        assert_eq!(admin.password, "secret");
        assert!(!admin.is_supervisor);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let directory = MemoryDirectory::new();
        let now = Utc::now();

        let first = directory.insert_user(new_user("jdoe"), now).await.expect("insert");
        let second = directory.insert_user(new_user("jdoe"), now).await;

        assert_eq!(first.user_id, 1);
        assert_eq!(second, Err(DirectoryError::DuplicateUser("jdoe".to_string())));
    }

    #[tokio::test]
    async fn duplicate_role_is_rejected() {
        let directory = MemoryDirectory::new();
        let role = NewRole {
            role_name: "Auditor".to_string(),
            role_description: String::new(),
            role_start_date: String::new(),
            role_end_date: String::new(),
        };

        directory.insert_role(role.clone(), Utc::now()).await.expect("insert");
        assert!(matches!(
            directory.insert_role(role, Utc::now()).await,
            Err(DirectoryError::DuplicateRole(_))
        ));
    }
}
