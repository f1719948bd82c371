// ── Listing form domain types ──

use strum::EnumIter;

/// One room-type entry in the listing form. All fields hold raw input
/// text; numeric parsing happens on the backend, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomTypeEntry {
    pub name: String,
    pub price: String,
    pub rooms: String,
}

impl RoomTypeEntry {
    /// Required fields of this entry, in form order, with their labels.
    pub fn required_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("Room Name", self.name.as_str()),
            ("Price (Rs/month)", self.price.as_str()),
            ("Available Rooms", self.rooms.as_str()),
        ]
    }
}

/// Facility checkboxes offered on the listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Facility {
    Wifi,
    Mess,
    Laundry,
    AirConditioning,
    Parking,
    Security,
    PowerBackup,
    WaterSupply,
}

impl Facility {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wifi => "WiFi",
            Self::Mess => "Mess",
            Self::Laundry => "Laundry",
            Self::AirConditioning => "Air Conditioning",
            Self::Parking => "Parking",
            Self::Security => "24/7 Security",
            Self::PowerBackup => "Power Backup",
            Self::WaterSupply => "Water Supply",
        }
    }
}

/// An accepted listing photo. Held in memory only; never part of any
/// submission payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub mime: String,
    pub size_bytes: u64,
}
