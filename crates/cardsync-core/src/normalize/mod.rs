//! Wire record normalization.
//!
//! Turns the loosely typed records in [`crate::wire`] into canonical
//! [`crate::models`] entities. Normalization is total: missing or malformed
//! input degrades to defaults, it never fails.

mod dates;

use chrono::{DateTime, Utc};

use crate::models::{
    new_local_id, Address, Card, CardEmail, CardPhone, CardWebsite, Contact, EmailKind, Entity,
    Lead, LeadStatus, PhoneKind, Provenance,
};
use crate::util::{first_present, normalize_text_option};
use crate::wire::{WireAddress, WireCard, WireContact, WireEmail, WireLead, WirePhone, WireWebsite};

pub use dates::{format_server_date, parse_server_date, SERVER_DATE_FORMAT};

/// Wire records that normalize into a canonical entity.
pub trait Normalize {
    type Output: Entity;

    fn normalize(&self, normalizer: &Normalizer) -> Self::Output;
}

/// Normalizes wire records against a fixed "now".
///
/// The instant is captured once so every fallback timestamp in a batch is
/// identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    now: DateTime<Utc>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Normalizer anchored at the current instant.
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Normalizer anchored at the given instant.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn card(&self, wire: &WireCard) -> Card {
        let now_millis = self.now.timestamp_millis();
        Card {
            id: identity(wire.id.as_ref()),
            remote_id: normalize_text_option(wire.id.clone()),
            first_name: wire.first_name.clone().unwrap_or_default(),
            last_name: wire.last_name.clone().unwrap_or_default(),
            phone_number: wire.phone_number.clone().unwrap_or_default(),
            company_name: wire.company_name.clone(),
            job_title: wire.job_title.clone(),
            bio: wire.bio.clone(),
            theme: wire.theme.clone(),
            profile_photo_path: wire.profile_photo_path.clone(),
            company_logo_path: wire.company_logo_path.clone(),
            cover_graphic_path: wire.cover_graphic_path.clone(),
            emails: wire.emails.iter().filter_map(card_email).collect(),
            phones: wire.phones.iter().filter_map(card_phone).collect(),
            websites: wire.websites.iter().filter_map(card_website).collect(),
            address: wire.address.as_ref().and_then(address),
            created_at: epoch_millis(wire.created_at.as_deref()).unwrap_or(now_millis),
            updated_at: epoch_millis(wire.updated_at.as_deref()).unwrap_or(now_millis),
            is_active: wire.is_active == Some(true),
            is_deleted: wire.is_deleted == Some(true),
        }
    }

    pub fn contact(&self, wire: &WireContact) -> Contact {
        let lead_id = lead_reference(wire.lead_id.as_ref());
        let provenance = provenance(wire, lead_id.is_some());
        let (created_at, updated_at) =
            self.passthrough_timestamps(wire.created_at.as_ref(), wire.updated_at.as_ref());

        Contact {
            id: identity(wire.id.as_ref()),
            remote_id: normalize_text_option(wire.id.clone()),
            first_name: wire.first_name.clone().unwrap_or_default(),
            last_name: wire.last_name.clone().unwrap_or_default(),
            email: first_present([&wire.email_primary, &wire.email]),
            phone: first_present([&wire.work_phone, &wire.phone, &wire.phone_primary]),
            mobile_phone: wire.mobile_phone.clone(),
            company: first_present([&wire.organization_name, &wire.company, &wire.company_name]),
            job_title: first_present([&wire.job_title, &wire.title]),
            address: first_present([&wire.street_address, &wire.address, &wire.address_line1]),
            city: wire.city.clone(),
            state: first_present([&wire.state, &wire.state_province]),
            zip_code: first_present([&wire.zip_code, &wire.postal_code]),
            country: wire.country.clone(),
            website: first_present([&wire.website_url, &wire.website]),
            notes: wire.notes.clone(),
            comments_from_lead: wire.comments_from_lead.clone(),
            birthdate: wire.birthdate.clone(),
            photo_url: wire.photo_url.clone(),
            provenance,
            source_metadata: wire.source_metadata.clone(),
            lead_id,
            created_at,
            updated_at,
            is_deleted: wire.is_deleted == Some(true),
        }
    }

    pub fn lead(&self, wire: &WireLead) -> Lead {
        let (created_at, updated_at) =
            self.passthrough_timestamps(wire.created_at.as_ref(), wire.updated_at.as_ref());

        Lead {
            id: identity(wire.id.as_ref()),
            remote_id: normalize_text_option(wire.id.clone()),
            first_name: wire.first_name.clone().unwrap_or_default(),
            last_name: wire.last_name.clone().unwrap_or_default(),
            full_name: wire.full_name.clone(),
            email: first_present([&wire.email_primary, &wire.email]),
            work_phone: wire.work_phone.clone(),
            mobile_phone: first_present([&wire.mobile_phone, &wire.phone]),
            street_address: first_present([&wire.street_address, &wire.address]),
            city: wire.city.clone(),
            state: wire.state.clone(),
            zip_code: wire.zip_code.clone(),
            country: wire.country.clone(),
            organization_name: first_present([&wire.organization_name, &wire.company]),
            job_title: first_present([&wire.job_title, &wire.title]),
            birthdate: wire.birthdate.clone(),
            website: wire.website_url.clone(),
            photo_url: wire.photo_url.clone(),
            comments_from_lead: wire.comments_from_lead.clone(),
            card_first_name: wire.card_first_name.clone(),
            card_last_name: wire.card_last_name.clone(),
            card_company: wire.card_company.clone(),
            card_job_title: wire.card_job_title.clone(),
            qr_title: wire.qr_title.clone(),
            qr_type: wire.qr_type.clone(),
            status: LeadStatus::from_wire(wire.status.as_deref()),
            created_at,
            updated_at,
            is_deleted: wire.is_deleted == Some(true),
        }
    }

    /// String timestamps pass through untouched; only missing values are filled.
    ///
    /// A missing `created_at` becomes "now" in server format and a missing
    /// `updated_at` reuses `created_at`.
    fn passthrough_timestamps(
        &self,
        created_at: Option<&String>,
        updated_at: Option<&String>,
    ) -> (String, String) {
        let created_at = non_blank(created_at)
            .cloned()
            .unwrap_or_else(|| format_server_date(self.now));
        let updated_at = non_blank(updated_at)
            .cloned()
            .unwrap_or_else(|| created_at.clone());
        (created_at, updated_at)
    }
}

impl Normalize for WireCard {
    type Output = Card;

    fn normalize(&self, normalizer: &Normalizer) -> Card {
        normalizer.card(self)
    }
}

impl Normalize for WireContact {
    type Output = Contact;

    fn normalize(&self, normalizer: &Normalizer) -> Contact {
        normalizer.contact(self)
    }
}

impl Normalize for WireLead {
    type Output = Lead;

    fn normalize(&self, normalizer: &Normalizer) -> Lead {
        normalizer.lead(self)
    }
}

fn non_blank(value: Option<&String>) -> Option<&String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Wire identity when present, otherwise a freshly generated local one.
fn identity(wire_id: Option<&String>) -> String {
    normalize_text_option(wire_id.cloned()).unwrap_or_else(new_local_id)
}

fn epoch_millis(raw: Option<&str>) -> Option<i64> {
    raw.and_then(parse_server_date)
}

/// A lead reference of `"0"` is the server's "no lead".
fn lead_reference(raw: Option<&String>) -> Option<String> {
    normalize_text_option(raw.cloned()).filter(|id| id != "0")
}

/// Contact provenance, first matching rule wins:
/// explicit `source_type` of converted, then a lead reference, then an
/// explicit `source`, then manual.
fn provenance(wire: &WireContact, has_lead_reference: bool) -> Provenance {
    let converted_flag = wire
        .source_type
        .as_deref()
        .is_some_and(|source_type| source_type.trim().eq_ignore_ascii_case("converted"));
    if converted_flag || has_lead_reference {
        return Provenance::Converted;
    }

    normalize_text_option(wire.source.clone()).map_or(Provenance::Manual, Provenance::from)
}

fn card_email(wire: &WireEmail) -> Option<CardEmail> {
    let email = normalize_text_option(wire.email.clone())?;
    Some(CardEmail {
        id: identity(wire.id.as_ref()),
        email,
        kind: EmailKind::from_wire(wire.kind.as_deref()),
        label: wire.label.clone(),
        is_primary: wire.is_primary == Some(true),
    })
}

fn card_phone(wire: &WirePhone) -> Option<CardPhone> {
    let phone_number = normalize_text_option(wire.phone_number.clone())?;
    Some(CardPhone {
        id: identity(wire.id.as_ref()),
        phone_number,
        kind: PhoneKind::from_wire(wire.kind.as_deref()),
        label: wire.label.clone(),
    })
}

fn card_website(wire: &WireWebsite) -> Option<CardWebsite> {
    let url = normalize_text_option(wire.url.clone())?;
    Some(CardWebsite {
        id: identity(wire.id.as_ref()),
        url,
        name: wire.name.clone().unwrap_or_default(),
        description: wire.description.clone(),
        is_primary: wire.is_primary == Some(true),
    })
}

fn address(wire: &WireAddress) -> Option<Address> {
    let address = Address {
        street: normalize_text_option(wire.street.clone()),
        city: normalize_text_option(wire.city.clone()),
        state: normalize_text_option(wire.state.clone()),
        zip_code: normalize_text_option(first_present([&wire.postal_code, &wire.zip_code])),
        country: normalize_text_option(wire.country.clone()),
    };
    (!address.is_empty()).then_some(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn normalizer() -> Normalizer {
        Normalizer::at(fixed_instant())
    }

    fn wire_card(value: serde_json::Value) -> WireCard {
        serde_json::from_value(value).unwrap()
    }

    fn wire_contact(value: serde_json::Value) -> WireContact {
        serde_json::from_value(value).unwrap()
    }

    fn wire_lead(value: serde_json::Value) -> WireLead {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn wire_identity_is_stable_across_runs() {
        let wire = wire_card(json!({ "id": 101, "first_name": "Ada" }));
        let first = normalizer().card(&wire);
        let second = normalizer().card(&wire);
        assert_eq!(first.id, "101");
        assert_eq!(first.id, second.id);
        assert_eq!(first.remote_id.as_deref(), Some("101"));
    }

    #[test]
    fn missing_identity_is_generated_and_unique() {
        let a = normalizer().card(&wire_card(json!({ "first_name": "A" })));
        let b = normalizer().card(&wire_card(json!({ "first_name": "B" })));
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn card_remote_identity_is_never_generated() {
        let card = normalizer().card(&wire_card(json!({ "id": "   " })));
        assert!(!card.id.trim().is_empty());
        assert_eq!(card.remote_id, None);
    }

    #[test]
    fn required_strings_default_empty_and_optionals_stay_none() {
        let card = normalizer().card(&wire_card(json!({ "id": "1" })));
        assert_eq!(card.first_name, "");
        assert_eq!(card.last_name, "");
        assert_eq!(card.phone_number, "");
        assert_eq!(card.bio, None);
        assert_eq!(card.company_name, None);
        assert!(card.emails.is_empty());
        assert!(card.phones.is_empty());
        assert!(card.websites.is_empty());
        assert_eq!(card.address, None);
    }

    #[test]
    fn primary_flag_coerces_from_integer() {
        let card = normalizer().card(&wire_card(json!({
            "id": "1",
            "emails": [
                { "email": "a@example.com", "is_primary": 1 },
                { "email": "b@example.com", "is_primary": 0 },
                { "email": "c@example.com" }
            ]
        })));
        let flags: Vec<bool> = card.emails.iter().map(|email| email.is_primary).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn active_and_deleted_flags_default_false() {
        let card = normalizer().card(&wire_card(json!({ "id": "1" })));
        assert!(!card.is_active);
        assert!(!card.is_deleted);

        let card = normalizer().card(&wire_card(json!({ "id": "1", "is_active": 1, "is_deleted": 1 })));
        assert!(card.is_active);
        assert!(card.is_deleted);
    }

    #[test]
    fn sub_types_fall_back_to_defaults() {
        let card = normalizer().card(&wire_card(json!({
            "id": "1",
            "emails": [
                { "email": "a@example.com", "type": "Personal" },
                { "email": "b@example.com", "type": "carrier-pigeon" },
                { "email": "c@example.com" }
            ],
            "phones": [
                { "phone_number": "555-0100", "type": "HOME" },
                { "phone_number": "555-0101", "type": "satellite" },
                { "phone_number": "555-0102" }
            ]
        })));
        let email_kinds: Vec<EmailKind> = card.emails.iter().map(|email| email.kind).collect();
        assert_eq!(
            email_kinds,
            vec![EmailKind::Personal, EmailKind::Other, EmailKind::Other]
        );
        let phone_kinds: Vec<PhoneKind> = card.phones.iter().map(|phone| phone.kind).collect();
        assert_eq!(
            phone_kinds,
            vec![PhoneKind::Home, PhoneKind::Mobile, PhoneKind::Mobile]
        );
    }

    #[test]
    fn unusable_nested_elements_are_dropped() {
        let card = normalizer().card(&wire_card(json!({
            "id": "1",
            "emails": [{ "type": "work" }, { "email": "  " }, { "email": "ok@example.com" }],
            "phones": [{ "label": "desk" }],
            "websites": [{ "name": "blog" }, { "url": "https://example.com" }],
            "address": { "street": null, "city": "" }
        })));
        assert_eq!(card.emails.len(), 1);
        assert_eq!(card.emails[0].email, "ok@example.com");
        assert!(card.phones.is_empty());
        assert_eq!(card.websites.len(), 1);
        assert_eq!(card.websites[0].name, "");
        assert_eq!(card.address, None);
    }

    #[test]
    fn address_accepts_either_postal_code_key() {
        let card = normalizer().card(&wire_card(json!({
            "id": "1",
            "address": { "street": "1 Main St", "zip_code": "12345" }
        })));
        assert_eq!(
            card.address,
            Some(Address {
                street: Some("1 Main St".to_string()),
                zip_code: Some("12345".to_string()),
                ..Address::default()
            })
        );
    }

    #[test]
    fn card_dates_parse_or_fall_back_to_now() {
        let card = normalizer().card(&wire_card(json!({
            "id": "1",
            "created_at": "2024-01-01 00:00:00",
            "updated_at": "not-a-date"
        })));
        let expected_created = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(card.created_at, expected_created);
        assert_eq!(card.updated_at, fixed_instant().timestamp_millis());

        let card = normalizer().card(&wire_card(json!({ "id": "1" })));
        assert_eq!(card.created_at, fixed_instant().timestamp_millis());
    }

    #[test]
    fn contact_aliases_prefer_declared_order() {
        let contact = normalizer().contact(&wire_contact(json!({
            "id": "c1",
            "company": "Legacy Co",
            "organization_name": "Acme",
            "phone": "555-0001",
            "work_phone": "555-0002",
            "address_line1": "9 Old Rd",
            "email": "fallback@example.com"
        })));
        assert_eq!(contact.company.as_deref(), Some("Acme"));
        assert_eq!(contact.phone.as_deref(), Some("555-0002"));
        assert_eq!(contact.address.as_deref(), Some("9 Old Rd"));
        assert_eq!(contact.email.as_deref(), Some("fallback@example.com"));
    }

    #[test]
    fn provenance_explicit_flag_beats_source_string() {
        let contact = normalizer().contact(&wire_contact(json!({
            "id": "c1",
            "source": "referral",
            "source_type": "converted"
        })));
        assert_eq!(contact.provenance, Provenance::Converted);
    }

    #[test]
    fn provenance_lead_reference_beats_source_string() {
        let contact = normalizer().contact(&wire_contact(json!({
            "id": "c1",
            "source": "referral",
            "id_lead": 55
        })));
        assert_eq!(contact.provenance, Provenance::Converted);
        assert_eq!(contact.lead_id.as_deref(), Some("55"));
    }

    #[test]
    fn provenance_uses_source_string_then_manual() {
        let contact = normalizer().contact(&wire_contact(json!({
            "id": "c1",
            "source": "referral",
            "id_lead": "0"
        })));
        assert_eq!(contact.provenance, Provenance::Other("referral".to_string()));
        assert_eq!(contact.lead_id, None);

        let contact = normalizer().contact(&wire_contact(json!({ "id": "c2" })));
        assert_eq!(contact.provenance, Provenance::Manual);
    }

    #[test]
    fn contact_timestamps_pass_through_or_fill_missing() {
        let contact = normalizer().contact(&wire_contact(json!({
            "id": "c1",
            "created_at": "2024-02-02T10:00:00.000Z",
            "updated_at": "yesterday-ish"
        })));
        assert_eq!(contact.created_at, "2024-02-02T10:00:00.000Z");
        assert_eq!(contact.updated_at, "yesterday-ish");

        let contact = normalizer().contact(&wire_contact(json!({
            "id": "c2",
            "created_at": "2024-02-02 10:00:00"
        })));
        assert_eq!(contact.updated_at, "2024-02-02 10:00:00");

        let contact = normalizer().contact(&wire_contact(json!({ "id": "c3" })));
        assert_eq!(contact.created_at, "2025-06-01 08:00:00");
        assert_eq!(contact.updated_at, "2025-06-01 08:00:00");
    }

    #[test]
    fn lead_collapses_aliases_and_keeps_snapshots() {
        let lead = normalizer().lead(&wire_lead(json!({
            "id": 9,
            "first_name": "Grace",
            "email": "grace@example.com",
            "phone": "555-0199",
            "company": "Navy",
            "title": "Rear Admiral",
            "card_first_name": "Ada",
            "card_company": "Engines Ltd",
            "qr_title": "Booth 12",
            "qr_type": "event",
            "status": "CONVERTED"
        })));
        assert_eq!(lead.id, "9");
        assert_eq!(lead.last_name, "");
        assert_eq!(lead.email.as_deref(), Some("grace@example.com"));
        assert_eq!(lead.mobile_phone.as_deref(), Some("555-0199"));
        assert_eq!(lead.organization_name.as_deref(), Some("Navy"));
        assert_eq!(lead.job_title.as_deref(), Some("Rear Admiral"));
        assert_eq!(lead.card_first_name.as_deref(), Some("Ada"));
        assert_eq!(lead.card_company.as_deref(), Some("Engines Ltd"));
        assert_eq!(lead.qr_title.as_deref(), Some("Booth 12"));
        assert_eq!(lead.status, LeadStatus::Converted);
    }

    #[test]
    fn lead_without_status_is_new() {
        let lead = normalizer().lead(&wire_lead(json!({ "id": "1" })));
        assert_eq!(lead.status, LeadStatus::New);
    }

    #[test]
    fn normalize_trait_dispatches_per_kind() {
        let normalizer = normalizer();
        let card = WireCard::default().normalize(&normalizer);
        let contact = WireContact::default().normalize(&normalizer);
        let lead = WireLead::default().normalize(&normalizer);
        assert!(!card.id.is_empty());
        assert!(!contact.id.is_empty());
        assert!(!lead.id.is_empty());
    }
}
