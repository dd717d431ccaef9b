//! Person name attribution for a selected asset.

use kiosk_core::{Candidate, PersonId};

/// Set the candidate's display name to the name of the requested person.
///
/// Ids compare case-insensitively; when several people match, the last one
/// wins. Leaves the candidate untouched when nobody matches.
pub fn attribute_person(candidate: &mut Candidate, person_id: &PersonId) {
    if let Some(person) = candidate
        .people
        .iter()
        .rev()
        .find(|person| person_id.matches(&person.id))
    {
        candidate.display_name = Some(person.name.clone());
    }
}
