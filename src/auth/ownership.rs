use super::authenticator::Principal;

pub const NOT_OWNER: &str = "not authorized to modify this resource";

/// Outcome of an ownership check on a mutating request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny(&'static str),
}

impl Decision {
    pub fn is_permitted(&self) -> bool {
        matches!(self, Decision::Permit)
    }
}

/// Only the owner of a resource may update or delete it.
pub fn authorize(principal: &Principal, resource_owner_id: i32) -> Decision {
    if principal.id == resource_owner_id {
        Decision::Permit
    } else {
        Decision::Deny(NOT_OWNER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: i32) -> Principal {
        Principal {
            id,
            first_name: "Joe".into(),
            last_name: "Smith".into(),
            email: format!("user{}@example.com", id),
        }
    }

    #[test]
    fn owner_is_permitted() {
        assert_eq!(authorize(&principal(5), 5), Decision::Permit);
        assert!(authorize(&principal(5), 5).is_permitted());
    }

    #[test]
    fn non_owner_is_denied() {
        let decision = authorize(&principal(5), 7);
        assert_eq!(decision, Decision::Deny(NOT_OWNER));
        assert!(!decision.is_permitted());
    }
}
