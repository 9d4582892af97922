//! In-memory user directory.

use crate::domain::{NewUser, User, UserId};

/// Users known to this instance. Phones are unique; ids are never reused.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
    next_id: i64,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id.as_i64()).max().unwrap_or(0) + 1;
        Self { users, next_id }
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_phone(&self, phone: &str) -> Option<&User> {
        self.users.iter().find(|u| u.phone == phone)
    }

    /// Exact, case-sensitive match on both phone and password.
    pub fn find_by_credentials(&self, phone: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.phone == phone && u.password == password)
    }

    /// Append a user with the next id. Returns `None` if the phone is taken.
    pub fn insert(&mut self, new_user: NewUser) -> Option<&User> {
        if self.find_by_phone(&new_user.phone).is_some() {
            return None;
        }
        let id = UserId::new(self.next_id);
        self.next_id += 1;
        self.users.push(new_user.into_user(id));
        self.users.last()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn new_user(phone: &str) -> NewUser {
        NewUser {
            name: "Amina Bello".to_string(),
            phone: phone.to_string(),
            password: "secret1".to_string(),
            role: Role::Trader,
        }
    }

    #[test]
    fn test_ids_continue_after_seeded_max() {
        let seeded = new_user("08031111111").into_user(UserId::new(5));
        let mut dir = UserDirectory::new(vec![seeded]);
        let user = dir.insert(new_user("08032222222")).unwrap();
        assert_eq!(user.id, UserId::new(6));
    }

    #[test]
    fn test_duplicate_phone_rejected() {
        let mut dir = UserDirectory::default();
        assert!(dir.insert(new_user("08031111111")).is_some());
        assert!(dir.insert(new_user("08031111111")).is_none());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_credentials_are_case_sensitive() {
        let mut dir = UserDirectory::default();
        dir.insert(new_user("08031111111"));
        assert!(dir.find_by_credentials("08031111111", "secret1").is_some());
        assert!(dir.find_by_credentials("08031111111", "SECRET1").is_none());
    }
}
