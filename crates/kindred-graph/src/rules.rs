//! Field-level validation rules
//!
//! Structural rules that need the whole graph (existence, duplicates, cycles) live on
//! [`FamilyGraph`](crate::FamilyGraph); the checks here only look at the records they
//! are given.

use crate::ValidationError;
use kindred_domain::{Person, RelationshipMetadata};

/// Name must contain something other than whitespace
pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

/// Death date must not precede birth date
pub fn check_life_dates(person: &Person) -> Result<(), ValidationError> {
    if let (Some(birth), Some(death)) = (person.birth_date, person.death_date) {
        if death < birth {
            return Err(ValidationError::DeathBeforeBirth);
        }
    }
    Ok(())
}

/// Every field-level rule for a person
pub fn check_person(person: &Person) -> Result<(), ValidationError> {
    check_name(&person.name)?;
    check_life_dates(person)
}

/// Parent must be born strictly before the child when both dates are known
pub fn check_parent_birth(parent: &Person, child: &Person) -> Result<(), ValidationError> {
    if let (Some(parent_birth), Some(child_birth)) = (parent.birth_date, child.birth_date) {
        if parent_birth >= child_birth {
            return Err(ValidationError::ParentNotOlder);
        }
    }
    Ok(())
}

/// Divorce must not precede marriage
pub fn check_marriage_dates(metadata: &RelationshipMetadata) -> Result<(), ValidationError> {
    if let (Some(married), Some(divorced)) = (metadata.marriage_date, metadata.divorce_date) {
        if divorced < married {
            return Err(ValidationError::DivorceBeforeMarriage);
        }
    }
    Ok(())
}
