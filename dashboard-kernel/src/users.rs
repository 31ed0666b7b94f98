/**
 * ANNUAIRE UTILISATEURS - Roster statique du dashboard
 *
 * RÔLE : Liste immuable chargée une fois au démarrage (config), jamais
 * modifiée ensuite. Toutes les données générées référencent un User de ce roster.
 *
 * RÈGLE : sans `user_id`, les endpoints filtrables prennent le premier
 * utilisateur du roster (et non "tous les utilisateurs").
 */

use crate::error::DashboardError;
use crate::models::User;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>, // ordre d'insertion conservé
}

impl UserDirectory {
    /// Construit le roster ; un id en double est ignoré (la première occurrence gagne)
    pub fn new(users: Vec<User>) -> Self {
        let mut seen = HashSet::new();
        let mut roster = Vec::with_capacity(users.len());
        for user in users {
            if seen.insert(user.id.clone()) {
                roster.push(user);
            } else {
                tracing::warn!(user_id = %user.id, "duplicate user id in roster, ignored");
            }
        }
        Self { users: roster }
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn get(&self, id: &str) -> Result<&User, DashboardError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| DashboardError::UserNotFound(id.to_string()))
    }

    /// `None` => premier utilisateur du roster
    pub fn resolve(&self, user_id: Option<&str>) -> Result<&User, DashboardError> {
        match user_id {
            Some(id) => self.get(id),
            None => self
                .users
                .first()
                .ok_or_else(|| DashboardError::UserNotFound(String::new())),
        }
    }
}

/// Roster par défaut quand aucune config ne le fournit
pub fn default_roster() -> Vec<User> {
    [
        ("1", "Rithika", "rithika"),
        ("2", "Alex", "alex"),
        ("3", "Maya", "maya"),
        ("4", "Javier", "javier"),
    ]
    .into_iter()
    .map(|(id, name, slug)| User {
        id: id.to_string(),
        name: name.to_string(),
        avatar: Some(format!("https://i.pravatar.cc/150?u={slug}")),
    })
    .collect()
}
