use crate::canister::Principal;
use crate::table::User;
use std::collections::HashMap;

/// Users→canister lookup cache.
///
/// Profiles live on many users canisters; this remembers which one holds
/// whom, along with the last profile fetched, so seats can render names
/// without a round-trip. It round-trips through JSON for browser storage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Directory(HashMap<Principal, User>);

impl Directory {
    pub fn insert(&mut self, user: User) {
        self.0.insert(user.principal_id.clone(), user);
    }
    pub fn user(&self, principal: &Principal) -> Option<&User> {
        self.0.get(principal)
    }
    pub fn canister(&self, principal: &Principal) -> Option<&Principal> {
        self.user(principal).map(|u| &u.users_canister_id)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
    /// A corrupt cache is discarded rather than trusted.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json)
            .inspect_err(|e| log::debug!("[directory] discarding cache: {}", e))
            .unwrap_or_default()
    }
}

impl FromIterator<User> for Directory {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut directory = Self::default();
        iter.into_iter().for_each(|u| directory.insert(u));
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, canister: &str) -> User {
        User {
            principal_id: Principal::from(name),
            users_canister_id: Principal::from(canister),
            user_name: name.to_uppercase(),
            ..User::default()
        }
    }

    #[test]
    fn resolves_canister() {
        let directory = Directory::from_iter([user("alice", "users-1"), user("bob", "users-2")]);
        assert_eq!(
            directory.canister(&Principal::from("bob")),
            Some(&Principal::from("users-2"))
        );
        assert_eq!(directory.canister(&Principal::from("carol")), None);
    }

    #[test]
    fn survives_storage() {
        let directory = Directory::from_iter([user("alice", "users-1")]);
        assert_eq!(Directory::from_json(&directory.to_json()), directory);
        assert!(Directory::from_json("{not json").is_empty());
    }
}
