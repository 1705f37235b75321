//! Pack catalog derivation.
//!
//! The static menu tree and the per-pack item table are combined once,
//! eagerly, into a [`Catalog`]. Derivation walks the whole menu, so it is
//! the single source of truth for pack lookup: every pack the menu knows
//! about resolves through [`Catalog::get`], and a pack with no entry in
//! the item table is derived with an empty item list and flagged in the
//! log rather than silently reconstructed later.

use super::models::{Availability, PackConfig, PackItem, Product};
use tracing::warn;

/// Standard discount advertised on every bundled pack.
const PACK_DISCOUNT_PERCENT: f64 = 15.0;

/// An entry of the navigation menu. The last segment of `path` is the
/// pack id.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub title: String,
    pub path: String,
    pub description: String,
    pub image: String,
}

/// A titled group of menu entries.
#[derive(Debug, Clone)]
pub struct MenuSection {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

/// Title of the menu section that lists the complete packs.
pub const PACKS_SECTION_TITLE: &str = "Nos packs Complet";

fn entry(title: &str, path: &str, description: &str, image: &str) -> MenuEntry {
    MenuEntry {
        title: title.to_string(),
        path: path.to_string(),
        description: description.to_string(),
        image: image.to_string(),
    }
}

/// The static navigation menu.
pub fn menu_sections() -> Vec<MenuSection> {
    vec![
        MenuSection {
            title: PACKS_SECTION_TITLE.to_string(),
            entries: vec![
                entry(
                    "Pack Restaurant",
                    "/packs/restaurant",
                    "Tenue complete pour les equipes de cuisine et de salle",
                    "/Packs/PackRestaurant.jpg",
                ),
                entry(
                    "Pack Cafe",
                    "/packs/cafe",
                    "L'essentiel du service en cafe et brasserie",
                    "/Packs/PackCafe.jpg",
                ),
                entry(
                    "Pack Hotel",
                    "/packs/hotel",
                    "Uniformes d'accueil et d'etage pour l'hotellerie",
                    "/Packs/PackHotel.jpg",
                ),
                entry(
                    "Pack Medecin",
                    "/packs/medecin",
                    "Blouses et tuniques pour le personnel medical",
                    "/Packs/PackMedecin.jpg",
                ),
            ],
        },
        MenuSection {
            title: "Vetements de Travail".to_string(),
            entries: vec![
                entry(
                    "Vetements de Cuisine",
                    "/vetements/cuisine",
                    "Vestes, tabliers et pantalons de cuisine",
                    "/VetementDeCuisine/VesteDeChef.jpg",
                ),
                entry(
                    "Vetements Medicaux",
                    "/vetements/medical",
                    "Blouses et tuniques medicales",
                    "/VetementDeTravail/BlouseMedical.jpg",
                ),
            ],
        },
    ]
}

fn item(id: &str, name: &str, description: &str, image: &str, price: f64, perso: bool) -> PackItem {
    PackItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        price,
        is_personalizable: perso,
    }
}

/// Contents of each pack, keyed by pack id. Returns an empty list for a
/// pack the table does not know.
pub fn pack_items(pack_id: &str) -> Vec<PackItem> {
    match pack_id {
        "restaurant" => vec![
            item(
                "veste-cuisine-1",
                "Veste de Chef",
                "Veste professionnelle pour cuisine avec finitions premium",
                "/VetementDeCuisine/VesteDeChef.jpg",
                129.99,
                true,
            ),
            item(
                "tablier-cuisine-1",
                "Tablier Professionnel",
                "Protection robuste pour la cuisine avec poches multiples",
                "/VetementDeCuisine/TablierDeChef.jpg",
                79.99,
                true,
            ),
            item(
                "pantalon-cuisine-1",
                "Pantalon de Cuisine",
                "Confort et durabilite pour un usage intensif",
                "/VetementDeCuisine/PontalonDeChef.jpg",
                99.99,
                false,
            ),
            item(
                "chaussures-cuisine-1",
                "Chaussures de Securite",
                "Antiderapantes et resistantes pour la securite en cuisine",
                "/ChausureDeTravail/ChaussureDeCuisine.jpg",
                129.99,
                false,
            ),
        ],
        "cafe" => vec![
            item(
                "tablier-cuisine-1",
                "Tablier Barista",
                "Protection elegante avec espace pour accessoires",
                "/VetementDeCuisine/TablierDeChef.jpg",
                89.99,
                true,
            ),
            item(
                "veste-hotel-1",
                "Uniforme de Service",
                "Tenue professionnelle elegante pour service en salle",
                "/VetementServiceHotellerie/UniformeDeService.jpg",
                119.99,
                true,
            ),
            item(
                "chaussures-cuisine-1",
                "Chaussures Confort",
                "Pour le service de longue duree, confort maximal",
                "/ChausureDeTravail/ChaussureDeCuisine.jpg",
                109.99,
                false,
            ),
        ],
        "hotel" => vec![
            item(
                "tenue-accueil-1",
                "Tenue d'Accueil",
                "Premiere impression impeccable avec finitions de qualite",
                "/VetementServiceHotellerie/TenueDacceuil.jpg",
                159.99,
                true,
            ),
            item(
                "veste-hotel-1",
                "Uniforme Chambre",
                "Pour le personnel d'entretien, pratique et durable",
                "/VetementServiceHotellerie/UniformeDeService.jpg",
                129.99,
                true,
            ),
            item(
                "veste-cuisine-1",
                "Vetements Restaurant",
                "Pour le restaurant d'hotel, style et confort",
                "/VetementDeCuisine/VesteDeChef.jpg",
                139.99,
                true,
            ),
        ],
        "medecin" => vec![
            item(
                "blouse-medicale-1",
                "Blouse Medicale",
                "Pour les medecins, qualite superieure antimicrobienne",
                "/VetementDeTravail/BlouseMedical.jpg",
                149.99,
                true,
            ),
            item(
                "tunique-medicale-1",
                "Tunique Medicale",
                "Pour les infirmiers, confort et praticite",
                "/VetementDeTravail/TuniqueMedical.png",
                119.99,
                true,
            ),
            item(
                "pantalon-medical-1",
                "Pantalon Medical",
                "Confort toute la journee avec poches multiples",
                "/VetementDeTravail/CombinaisonDeTravail.jpg",
                99.99,
                false,
            ),
        ],
        _ => Vec::new(),
    }
}

/// Single products available on the builder shelf.
pub fn shelf_products() -> Vec<Product> {
    fn product(
        id: &str,
        name: &str,
        description: &str,
        price: f64,
        image: &str,
        category: &str,
        metier: &str,
        perso: bool,
        colors: &[&str],
    ) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            starting_price: price,
            image: image.to_string(),
            category: category.to_string(),
            metier_type: metier.to_string(),
            is_personalizable: perso,
            available_colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    vec![
        product(
            "veste-cuisine-1",
            "Veste de Chef",
            "Veste professionnelle pour cuisine avec finitions premium",
            129.99,
            "/VetementDeCuisine/VesteDeChef.jpg",
            "vetements-cuisine",
            "restauration",
            true,
            &["blanc", "noir"],
        ),
        product(
            "tablier-cuisine-1",
            "Tablier Professionnel",
            "Protection robuste pour la cuisine avec poches multiples",
            79.99,
            "/VetementDeCuisine/TablierDeChef.jpg",
            "vetements-cuisine",
            "restauration",
            true,
            &["noir", "bordeaux"],
        ),
        product(
            "pantalon-cuisine-1",
            "Pantalon de Cuisine",
            "Confort et durabilite pour un usage intensif",
            99.99,
            "/VetementDeCuisine/PontalonDeChef.jpg",
            "vetements-cuisine",
            "restauration",
            false,
            &[],
        ),
        product(
            "veste-hotel-1",
            "Uniforme de Service",
            "Tenue professionnelle elegante pour service en salle",
            119.99,
            "/VetementServiceHotellerie/UniformeDeService.jpg",
            "service-hotellerie",
            "hotellerie",
            true,
            &["blanc", "bleu"],
        ),
        product(
            "blouse-medicale-1",
            "Blouse Medicale",
            "Pour les medecins, qualite superieure antimicrobienne",
            149.99,
            "/VetementDeTravail/BlouseMedical.jpg",
            "vetements-medicaux",
            "sante",
            true,
            &["blanc"],
        ),
        product(
            "tunique-medicale-1",
            "Tunique Medicale",
            "Pour les infirmiers, confort et praticite",
            119.99,
            "/VetementDeTravail/TuniqueMedical.png",
            "vetements-medicaux",
            "sante",
            true,
            &["blanc", "vert"],
        ),
        product(
            "chaussures-cuisine-1",
            "Chaussures de Securite",
            "Antiderapantes et resistantes pour la securite en cuisine",
            129.99,
            "/ChausureDeTravail/ChaussureDeCuisine.jpg",
            "chaussures",
            "restauration",
            false,
            &[],
        ),
    ]
}

/// The derived pack catalog. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    packs: Vec<PackConfig>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::derive(&menu_sections())
    }
}

impl Catalog {
    /// Derives every pack listed in the packs section of the menu. A menu
    /// pack missing from the item table still yields a `PackConfig` (empty
    /// item list, zero total); the inconsistency is logged, not fatal.
    pub fn derive(sections: &[MenuSection]) -> Self {
        let packs = sections
            .iter()
            .find(|s| s.title == PACKS_SECTION_TITLE)
            .map(|section| {
                section
                    .entries
                    .iter()
                    .map(|entry| {
                        let id = entry
                            .path
                            .rsplit('/')
                            .next()
                            .unwrap_or(entry.path.as_str())
                            .to_string();
                        let items = pack_items(&id);
                        if items.is_empty() {
                            warn!(
                                pack_id = %id,
                                "menu lists a pack with no entry in the item table"
                            );
                        }
                        let total_price = items.iter().map(|i| i.price).sum();
                        PackConfig {
                            id,
                            title: entry.title.clone(),
                            description: entry.description.clone(),
                            image: entry.image.clone(),
                            items,
                            total_price,
                            discount_percent: PACK_DISCOUNT_PERCENT,
                            availability: Availability::InStock,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { packs }
    }

    /// The one authoritative pack lookup. Unknown id yields `None`.
    pub fn get(&self, pack_id: &str) -> Option<&PackConfig> {
        self.packs.iter().find(|p| p.id == pack_id)
    }

    pub fn packs(&self) -> &[PackConfig] {
        &self.packs
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
