// ── Listing form ──
//
// Controller for the multi-section "add hostel" form: base details,
// a bounded list of room types, facility toggles, and photo
// attachments. All state lives on the instance; progress and
// validation are recomputed from it on demand.

use std::collections::HashSet;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{Facility, PhotoAttachment, RoomTypeEntry};

/// Identifies one base field of the listing form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Name,
    Address,
    City,
    Description,
    ContactEmail,
    ContactPhone,
}

impl ListingField {
    pub const ALL: [ListingField; 6] = [
        ListingField::Name,
        ListingField::Address,
        ListingField::City,
        ListingField::Description,
        ListingField::ContactEmail,
        ListingField::ContactPhone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Hostel Name",
            Self::Address => "Address",
            Self::City => "City",
            Self::Description => "Description",
            Self::ContactEmail => "Contact Email",
            Self::ContactPhone => "Contact Phone",
        }
    }
}

/// Bounds enforced by the listing form, sourced from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLimits {
    pub min_room_types: usize,
    pub max_room_types: usize,
    pub max_image_bytes: u64,
    pub allowed_image_types: Vec<String>,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            min_room_types: 1,
            max_room_types: 10,
            max_image_bytes: 5 * 1024 * 1024,
            allowed_image_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
        }
    }
}

/// View model for the "add hostel" form.
#[derive(Debug)]
pub struct ListingForm {
    name: String,
    address: String,
    city: String,
    description: String,
    contact_email: String,
    contact_phone: String,
    room_types: Vec<RoomTypeEntry>,
    facilities: HashSet<Facility>,
    photos: Vec<PhotoAttachment>,
    submitting: bool,
    limits: ListingLimits,
}

impl ListingForm {
    /// An empty form opened at the minimum room-type count.
    pub fn new(limits: ListingLimits) -> Self {
        let room_types = (0..limits.min_room_types.max(1))
            .map(|_| RoomTypeEntry::default())
            .collect();
        Self {
            name: String::new(),
            address: String::new(),
            city: String::new(),
            description: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            room_types,
            facilities: HashSet::new(),
            photos: Vec::new(),
            submitting: false,
            limits,
        }
    }

    pub fn limits(&self) -> &ListingLimits {
        &self.limits
    }

    // ── Base fields ──

    pub fn value(&self, field: ListingField) -> &str {
        match field {
            ListingField::Name => &self.name,
            ListingField::Address => &self.address,
            ListingField::City => &self.city,
            ListingField::Description => &self.description,
            ListingField::ContactEmail => &self.contact_email,
            ListingField::ContactPhone => &self.contact_phone,
        }
    }

    pub fn value_mut(&mut self, field: ListingField) -> &mut String {
        match field {
            ListingField::Name => &mut self.name,
            ListingField::Address => &mut self.address,
            ListingField::City => &mut self.city,
            ListingField::Description => &mut self.description,
            ListingField::ContactEmail => &mut self.contact_email,
            ListingField::ContactPhone => &mut self.contact_phone,
        }
    }

    // ── Room types ──

    pub fn room_types(&self) -> &[RoomTypeEntry] {
        &self.room_types
    }

    pub fn room_type_mut(&mut self, index: usize) -> Option<&mut RoomTypeEntry> {
        self.room_types.get_mut(index)
    }

    /// Appends an empty room-type entry, refusing past the maximum.
    pub fn add_room_type(&mut self) -> Result<usize, CoreError> {
        if self.room_types.len() >= self.limits.max_room_types {
            return Err(CoreError::RoomTypeLimit {
                max: self.limits.max_room_types,
            });
        }
        self.room_types.push(RoomTypeEntry::default());
        debug!(count = self.room_types.len(), "Room type added");
        Ok(self.room_types.len() - 1)
    }

    /// Removes the entry at `index`, refusing below the minimum.
    pub fn remove_room_type(&mut self, index: usize) -> Result<(), CoreError> {
        if self.room_types.len() <= self.limits.min_room_types {
            return Err(CoreError::RoomTypeFloor {
                min: self.limits.min_room_types,
            });
        }
        if index >= self.room_types.len() {
            return Err(CoreError::UnknownRoomType { index });
        }
        self.room_types.remove(index);
        debug!(count = self.room_types.len(), "Room type removed");
        Ok(())
    }

    // ── Facilities ──

    /// Flips a facility checkbox; returns the new checked state.
    /// Facilities feed the progress display but are never required.
    pub fn toggle_facility(&mut self, facility: Facility) -> bool {
        if self.facilities.remove(&facility) {
            false
        } else {
            self.facilities.insert(facility);
            true
        }
    }

    pub fn facility_checked(&self, facility: Facility) -> bool {
        self.facilities.contains(&facility)
    }

    // ── Photos ──

    /// Accepts one photo, rejecting disallowed MIME types and oversized
    /// files. Each file is judged on its own, so a batch caller simply
    /// keeps going after an error.
    pub fn attach_photo(
        &mut self,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        size_bytes: u64,
    ) -> Result<(), CoreError> {
        let mime = mime.into();
        if !self.limits.allowed_image_types.iter().any(|m| *m == mime) {
            return Err(CoreError::UnsupportedImageType { mime });
        }
        if size_bytes > self.limits.max_image_bytes {
            return Err(CoreError::ImageTooLarge {
                max_bytes: self.limits.max_image_bytes,
            });
        }
        self.photos.push(PhotoAttachment {
            file_name: file_name.into(),
            mime,
            size_bytes,
        });
        Ok(())
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<PhotoAttachment> {
        if index < self.photos.len() {
            Some(self.photos.remove(index))
        } else {
            None
        }
    }

    pub fn photos(&self) -> &[PhotoAttachment] {
        &self.photos
    }

    // ── Progress ──

    /// Count of required fields: the six base fields plus three per
    /// room-type entry.
    pub fn required_total(&self) -> usize {
        ListingField::ALL.len() + self.room_types.len() * 3
    }

    /// Required fields currently holding non-blank input.
    pub fn required_filled(&self) -> usize {
        let base = ListingField::ALL
            .into_iter()
            .filter(|field| !self.value(*field).trim().is_empty())
            .count();
        let rooms = self
            .room_types
            .iter()
            .flat_map(|entry| entry.required_fields())
            .filter(|(_, value)| !value.trim().is_empty())
            .count();
        base + rooms
    }

    /// Completion percentage, rounded to the nearest whole percent.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    pub fn progress_percent(&self) -> u8 {
        let total = self.required_total();
        if total == 0 {
            return 0;
        }
        ((self.required_filled() as f64 / total as f64) * 100.0).round() as u8
    }

    // ── Validation & submission ──

    /// Checks the form and reports the first violation: required fields
    /// in form order, then email format, then phone format.
    pub fn validate(&self) -> Result<(), CoreError> {
        for field in ListingField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(CoreError::RequiredField {
                    label: field.label().to_string(),
                });
            }
        }
        for entry in &self.room_types {
            for (label, value) in entry.required_fields() {
                if value.trim().is_empty() {
                    return Err(CoreError::RequiredField {
                        label: label.to_string(),
                    });
                }
            }
        }
        if !is_valid_email(&self.contact_email) {
            return Err(CoreError::InvalidEmail);
        }
        if !is_valid_phone(&self.contact_phone) {
            return Err(CoreError::InvalidPhone);
        }
        Ok(())
    }

    /// Validates and enters the submitting state ahead of the gateway
    /// call. A submit already in flight blocks a second one.
    pub fn begin_submit(&mut self) -> Result<(), CoreError> {
        if self.submitting {
            return Err(CoreError::RequestInFlight);
        }
        self.validate()?;
        self.submitting = true;
        debug!("Listing submission in flight");
        Ok(())
    }

    /// Leaves the submitting state; the form stays editable for another
    /// round.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

impl Default for ListingForm {
    fn default() -> Self {
        Self::new(ListingLimits::default())
    }
}

/// Email shape check: no whitespace, a single `@` with a non-empty
/// local part, and a dot inside the domain with characters on both
/// sides.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Phone shape check: at least ten characters, all of them digits,
/// whitespace, or `-+()`.
fn is_valid_phone(value: &str) -> bool {
    value.chars().count() >= 10
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '+' | '(' | ')'))
}

/// Infers a MIME type from a file name's extension. Unknown extensions
/// map to `application/octet-stream`, which the allow-list rejects.
pub fn mime_for_extension(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> ListingForm {
        ListingForm::new(ListingLimits::default())
    }

    fn filled_form() -> ListingForm {
        let mut form = form();
        *form.value_mut(ListingField::Name) = "Green Valley Hostel".to_string();
        *form.value_mut(ListingField::Address) = "12-B College Road".to_string();
        *form.value_mut(ListingField::City) = "Lahore".to_string();
        *form.value_mut(ListingField::Description) = "Quiet rooms near campus".to_string();
        *form.value_mut(ListingField::ContactEmail) = "owner@greenvalley.pk".to_string();
        *form.value_mut(ListingField::ContactPhone) = "0300-1234567".to_string();
        let entry = form.room_type_mut(0).unwrap();
        entry.name = "Single Room".to_string();
        entry.price = "15000".to_string();
        entry.rooms = "5".to_string();
        form
    }

    #[test]
    fn opens_at_the_minimum_room_type_count() {
        assert_eq!(form().room_types().len(), 1);
    }

    #[test]
    fn add_room_type_stops_at_the_maximum() {
        let mut form = form();
        for _ in 1..10 {
            form.add_room_type().unwrap();
        }
        assert_eq!(form.room_types().len(), 10);

        let err = form.add_room_type().unwrap_err();
        assert_eq!(err.to_string(), "Maximum 10 room types allowed.");
        assert_eq!(form.room_types().len(), 10);
    }

    #[test]
    fn remove_room_type_stops_at_the_minimum() {
        let mut form = form();
        form.add_room_type().unwrap();
        form.remove_room_type(1).unwrap();
        assert_eq!(form.room_types().len(), 1);

        let err = form.remove_room_type(0).unwrap_err();
        assert_eq!(err.to_string(), "You must have at least 1 room type.");
        assert_eq!(form.room_types().len(), 1);
    }

    #[test]
    fn remove_room_type_checks_the_index() {
        let mut form = form();
        form.add_room_type().unwrap();
        assert!(matches!(
            form.remove_room_type(5),
            Err(CoreError::UnknownRoomType { index: 5 })
        ));
    }

    #[test]
    fn progress_counts_base_and_room_fields() {
        let mut form = form();
        assert_eq!(form.progress_percent(), 0);
        assert_eq!(form.required_total(), 9);

        *form.value_mut(ListingField::Name) = "Green Valley".to_string();
        assert_eq!(form.progress_percent(), 11); // 1 of 9

        let form = filled_form();
        assert_eq!(form.progress_percent(), 100);
    }

    #[test]
    fn adding_an_entry_lowers_progress() {
        let mut form = filled_form();
        form.add_room_type().unwrap();
        assert_eq!(form.required_total(), 12);
        assert_eq!(form.progress_percent(), 75); // 9 of 12
    }

    #[test]
    fn blank_only_input_does_not_count_as_filled() {
        let mut form = form();
        *form.value_mut(ListingField::Name) = "   ".to_string();
        assert_eq!(form.required_filled(), 0);
    }

    #[test]
    fn validate_reports_the_first_missing_field_in_form_order() {
        let form = form();
        assert_eq!(form.validate().unwrap_err().to_string(), "Hostel Name is required");

        let mut form = filled_form();
        *form.value_mut(ListingField::City) = String::new();
        *form.value_mut(ListingField::ContactEmail) = "not-an-email".to_string();
        assert_eq!(form.validate().unwrap_err().to_string(), "City is required");
    }

    #[test]
    fn validate_reports_missing_room_fields_after_base_fields() {
        let mut form = filled_form();
        form.room_type_mut(0).unwrap().price = String::new();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Price (Rs/month) is required"
        );
    }

    #[test]
    fn validate_checks_email_then_phone() {
        let mut form = filled_form();
        *form.value_mut(ListingField::ContactEmail) = "owner@greenvalleypk".to_string();
        *form.value_mut(ListingField::ContactPhone) = "short".to_string();
        assert!(matches!(form.validate(), Err(CoreError::InvalidEmail)));

        *form.value_mut(ListingField::ContactEmail) = "owner@greenvalley.pk".to_string();
        assert!(matches!(form.validate(), Err(CoreError::InvalidPhone)));
    }

    #[test]
    fn email_shapes_match_the_expected_pattern() {
        assert!(is_valid_email("owner@greenvalley.pk"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("owner"));
        assert!(!is_valid_email("owner@"));
        assert!(!is_valid_email("@greenvalley.pk"));
        assert!(!is_valid_email("owner@greenvalleypk"));
        assert!(!is_valid_email("owner@greenvalley.pk "));
        assert!(!is_valid_email("ow ner@greenvalley.pk"));
        assert!(!is_valid_email("owner@valley@pk.com"));
        assert!(!is_valid_email("owner@.pk"));
        assert!(!is_valid_email("owner@pk."));
    }

    #[test]
    fn phone_shapes_match_the_expected_pattern() {
        assert!(is_valid_phone("0300-1234567"));
        assert!(is_valid_phone("+92 (300) 1234567"));
        assert!(!is_valid_phone("123456789")); // nine characters
        assert!(!is_valid_phone("0300#123456"));
    }

    #[test]
    fn pdf_attachments_are_rejected_with_the_type_message() {
        let mut form = form();
        let err = form
            .attach_photo("floorplan.pdf", "application/pdf", 100_000)
            .unwrap_err();
        assert_eq!(err.to_string(), "Please upload only JPEG, PNG, or WebP images.");
        assert!(form.photos().is_empty());
    }

    #[test]
    fn oversized_images_are_rejected_with_the_size_message() {
        let mut form = form();
        let err = form
            .attach_photo("lobby.jpg", "image/jpeg", 6 * 1024 * 1024)
            .unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 5MB.");
        assert!(form.photos().is_empty());
    }

    #[test]
    fn accepted_images_become_preview_chips() {
        let mut form = form();
        form.attach_photo("lobby.jpg", "image/jpeg", 1_200_000).unwrap();
        form.attach_photo("room.webp", "image/webp", 5 * 1024 * 1024)
            .unwrap(); // exactly at the limit
        assert_eq!(form.photos().len(), 2);

        let removed = form.remove_photo(0).unwrap();
        assert_eq!(removed.file_name, "lobby.jpg");
        assert_eq!(form.photos().len(), 1);
        assert!(form.remove_photo(5).is_none());
    }

    #[test]
    fn facility_toggles_flip_and_feed_nothing_into_validation() {
        let mut form = filled_form();
        assert!(form.toggle_facility(Facility::Wifi));
        assert!(form.facility_checked(Facility::Wifi));
        assert!(!form.toggle_facility(Facility::Wifi));
        assert!(!form.facility_checked(Facility::Wifi));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn begin_submit_blocks_a_second_submission() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert!(matches!(form.begin_submit(), Err(CoreError::RequestInFlight)));

        form.finish_submit();
        assert!(!form.is_submitting());
        form.begin_submit().unwrap();
    }

    #[test]
    fn begin_submit_refuses_an_invalid_form() {
        let mut form = form();
        assert!(form.begin_submit().is_err());
        assert!(!form.is_submitting());
    }

    #[test]
    fn mime_inference_covers_the_known_extensions() {
        assert_eq!(mime_for_extension("lobby.jpg"), "image/jpeg");
        assert_eq!(mime_for_extension("lobby.JPEG"), "image/jpeg");
        assert_eq!(mime_for_extension("room.png"), "image/png");
        assert_eq!(mime_for_extension("tour.webp"), "image/webp");
        assert_eq!(mime_for_extension("sticker.gif"), "image/gif");
        assert_eq!(mime_for_extension("floorplan.pdf"), "application/pdf");
        assert_eq!(mime_for_extension("README"), "application/octet-stream");
    }
}
