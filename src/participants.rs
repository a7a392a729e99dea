use crate::ids::IdGenerator;
use crate::models::ui::UiUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Me,
    Therapist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub role: Role,
    pub name: String,
    pub id: String,
}

impl Participant {
    pub fn to_ui_user(&self) -> UiUser {
        UiUser {
            first_name: self.name.clone(),
            id: self.id.clone(),
        }
    }
}

/// The two speakers of a conversation, keyed by role and looked up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRegistry {
    me: Participant,
    therapist: Participant,
}

impl ParticipantRegistry {
    pub fn new(
        user_name: impl Into<String>,
        therapist_name: impl Into<String>,
        ids: &dyn IdGenerator
    ) -> Self {
        Self {
            me: Participant {
                role: Role::Me,
                name: user_name.into(),
                id: ids.next_id(),
            },
            therapist: Participant {
                role: Role::Therapist,
                name: therapist_name.into(),
                id: ids.next_id(),
            },
        }
    }

    pub fn participant(&self, role: Role) -> &Participant {
        match role {
            Role::Me => &self.me,
            Role::Therapist => &self.therapist,
        }
    }

    pub fn me(&self) -> &Participant {
        &self.me
    }

    pub fn therapist(&self) -> &Participant {
        &self.therapist
    }

    /// Exact, case-insensitive match on the therapist's name; everything else is the local user.
    pub fn resolve_role(&self, author_name: &str) -> Role {
        if author_name.to_lowercase() == self.therapist.name.to_lowercase() {
            Role::Therapist
        } else {
            Role::Me
        }
    }

    pub fn resolve(&self, author_name: &str) -> &Participant {
        self.participant(self.resolve_role(author_name))
    }
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::new("me", "therapist", &crate::ids::UuidV4Ids)
    }
}
