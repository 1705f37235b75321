use serde::{Deserialize, Serialize};

/// Design numbers carrying this prefix describe an assembled pack rather
/// than a single personalized product.
pub const PACK_DESIGN_PREFIX: &str = "PACK-";

/// Per-file attachment limit, 5MB.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted for quote attachments.
pub const ALLOWED_MIME_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub starting_price: f64,
    pub image: String,
    pub category: String,
    pub metier_type: String,
    #[serde(default)]
    pub is_personalizable: bool,
    #[serde(default)]
    pub available_colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    #[serde(default)]
    pub is_personalizable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    InStock,
    Limited,
    OutOfStock,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::InStock => "in stock",
            Availability::Limited => "limited",
            Availability::OutOfStock => "out of stock",
        }
    }
}

/// A purchasable bundle derived from the menu tree and the item table.
/// Read-only once the catalog has been built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub items: Vec<PackItem>,
    pub total_price: f64,
    pub discount_percent: f64,
    pub availability: Availability,
}

/// A quote line item handed off to the quote screen. The camelCase field
/// names are the storage and hand-off wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub design_number: String,
    pub product_name: String,
    pub quantity: u32,
    pub selected_size: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<DesignItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignItem {
    pub name: String,
}

impl Design {
    pub fn is_pack(&self) -> bool {
        self.design_number.starts_with(PACK_DESIGN_PREFIX)
    }

    /// Product description pre-filled for a pack design, listing its
    /// constituent items.
    pub fn pack_description(&self) -> String {
        let names: Vec<&str> = self.items.iter().map(|i| i.name.as_str()).collect();
        format!("Pack {} comprenant: {}", self.product_name, names.join(", "))
    }
}

/// Raw values of the quote request form. All fields are kept as entered;
/// validation interprets them.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub product_name: String,
    pub quantity: String,
    pub size: String,
    pub description: String,
    pub deadline: String,
    pub additional_notes: String,
}

impl FormValues {
    pub fn quantity_value(&self) -> Option<u32> {
        self.quantity.trim().parse::<u32>().ok()
    }
}

/// A file accepted into the attachment list.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub mime: String,
}

/// Guesses the MIME type of a path from its extension. Only types that can
/// possibly pass the allow-list are recognized.
pub fn mime_for_path(path: &str) -> Option<&'static str> {
    let ext = path.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

/// Checks a candidate attachment against the size limit and the MIME
/// allow-list. Returns a user-facing rejection reason, or `None` if the
/// file is acceptable.
pub fn attachment_rejection(name: &str, size: u64, mime: Option<&str>) -> Option<String> {
    if size > MAX_ATTACHMENT_BYTES {
        return Some(format!("{} exceeds the 5MB size limit", name));
    }
    match mime {
        Some(m) if ALLOWED_MIME_TYPES.contains(&m) => None,
        _ => Some(format!("{} is not an allowed file type", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_design() -> Design {
        Design {
            design_number: "PACK-restaurant-1".to_string(),
            product_name: "Pack Restaurant".to_string(),
            quantity: 2,
            selected_size: "Standard".to_string(),
            items: vec![
                DesignItem { name: "Veste de Chef".to_string() },
                DesignItem { name: "Tablier Professionnel".to_string() },
            ],
        }
    }

    #[test]
    fn test_pack_prefix_detection() {
        let design = pack_design();
        assert!(design.is_pack());

        let single = Design {
            design_number: "D-1042".to_string(),
            product_name: "Blouse".to_string(),
            quantity: 1,
            selected_size: "M".to_string(),
            items: Vec::new(),
        };
        assert!(!single.is_pack());
    }

    #[test]
    fn test_pack_description_lists_items() {
        let design = pack_design();
        assert_eq!(
            design.pack_description(),
            "Pack Pack Restaurant comprenant: Veste de Chef, Tablier Professionnel"
        );
    }

    #[test]
    fn test_design_wire_contract_is_camel_case() {
        let design = pack_design();
        let json = serde_json::to_string(&design).unwrap();
        assert!(json.contains("\"designNumber\""));
        assert!(json.contains("\"productName\""));
        assert!(json.contains("\"selectedSize\""));

        let back: Design = serde_json::from_str(&json).unwrap();
        assert_eq!(back.design_number, design.design_number);
        assert_eq!(back.items.len(), 2);
    }

    #[test]
    fn test_design_without_items_omits_field() {
        let single = Design {
            design_number: "D-7".to_string(),
            product_name: "Tunique".to_string(),
            quantity: 3,
            selected_size: "L".to_string(),
            items: Vec::new(),
        };
        let json = serde_json::to_string(&single).unwrap();
        assert!(!json.contains("items"));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path("logo.PNG"), Some("image/png"));
        assert_eq!(mime_for_path("scan.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_for_path("brief.pdf"), Some("application/pdf"));
        assert_eq!(mime_for_path("notes.txt"), None);
        assert_eq!(mime_for_path("no_extension"), None);
    }

    #[test]
    fn test_attachment_rejection_size() {
        let reason = attachment_rejection("big.pdf", 6 * 1024 * 1024, Some("application/pdf"));
        assert!(reason.unwrap().contains("5MB"));
    }

    #[test]
    fn test_attachment_rejection_type() {
        let reason = attachment_rejection("script.sh", 100, None);
        assert!(reason.unwrap().contains("not an allowed file type"));
    }

    #[test]
    fn test_attachment_accepted() {
        assert!(attachment_rejection("ok.png", 1024, Some("image/png")).is_none());
        assert!(
            attachment_rejection("edge.pdf", MAX_ATTACHMENT_BYTES, Some("application/pdf"))
                .is_none()
        );
    }

    #[test]
    fn test_quantity_value_parsing() {
        let mut values = FormValues::default();
        values.quantity = "12".to_string();
        assert_eq!(values.quantity_value(), Some(12));

        values.quantity = " 3 ".to_string();
        assert_eq!(values.quantity_value(), Some(3));

        values.quantity = "abc".to_string();
        assert_eq!(values.quantity_value(), None);
    }
}
