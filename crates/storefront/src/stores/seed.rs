//! Seed catalog and testimonials.

use boutique_core::{Price, Product, ProductId, Rating, Testimonial, TestimonialId};

const UNSPLASH_PARAMS: &str = "ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop";

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: u64,
    old_price: Option<u64>,
    photo: &'static str,
    width: u32,
    category: &'static str,
    featured: bool,
    stock: u32,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: "1",
        name: "MacBook Pro M1",
        description: "Ordinateur portable Apple avec processeur M1, 8GB RAM, 256GB SSD",
        price: 675_000,
        old_price: Some(750_000),
        photo: "photo-1517336714731-489689fd1ca8",
        width: 1626,
        category: "Ordinateurs",
        featured: true,
        stock: 10,
    },
    SeedProduct {
        id: "2",
        name: "iPhone 15 Pro",
        description: "Smartphone Apple avec écran 6.1\", 256GB de stockage, couleur Titane",
        price: 550_000,
        old_price: None,
        photo: "photo-1678685387845-62e21232281e",
        width: 774,
        category: "Smartphones",
        featured: true,
        stock: 15,
    },
    SeedProduct {
        id: "3",
        name: "Samsung Galaxy S23 Ultra",
        description: "Smartphone Samsung avec écran 6.8\", 512GB de stockage, 12GB RAM",
        price: 480_000,
        old_price: Some(500_000),
        photo: "photo-1678685387832-a75975c3ca59",
        width: 774,
        category: "Smartphones",
        featured: true,
        stock: 8,
    },
    SeedProduct {
        id: "4",
        name: "Dell XPS 15",
        description: "Ordinateur portable Dell avec processeur Intel i7, 16GB RAM, 512GB SSD",
        price: 450_000,
        old_price: None,
        photo: "photo-1593642632823-8f785ba67e45",
        width: 1632,
        category: "Ordinateurs",
        featured: false,
        stock: 5,
    },
    SeedProduct {
        id: "5",
        name: "iPad Pro 12.9\"",
        description: "Tablette Apple avec écran 12.9\", M2 chip, 256GB de stockage",
        price: 375_000,
        old_price: None,
        photo: "photo-1544244015-0df4b3ffc6b0",
        width: 1633,
        category: "Tablettes",
        featured: false,
        stock: 12,
    },
    SeedProduct {
        id: "6",
        name: "AirPods Pro 2",
        description: "Écouteurs sans fil Apple avec annulation active du bruit",
        price: 95_000,
        old_price: None,
        photo: "photo-1606741965429-5a66b36320ae",
        width: 1633,
        category: "Accessoires",
        featured: false,
        stock: 20,
    },
    SeedProduct {
        id: "7",
        name: "Sony WH-1000XM5",
        description: "Casque sans fil Sony avec annulation active du bruit",
        price: 125_000,
        old_price: None,
        photo: "photo-1546435770-a3e426bf472b",
        width: 1646,
        category: "Accessoires",
        featured: false,
        stock: 7,
    },
    SeedProduct {
        id: "8",
        name: "Microsoft Surface Laptop 5",
        description: "Ordinateur portable Microsoft avec processeur Intel i5, 8GB RAM, 256GB SSD",
        price: 425_000,
        old_price: None,
        photo: "photo-1661961110372-8a7682543120",
        width: 1470,
        category: "Ordinateurs",
        featured: false,
        stock: 6,
    },
];

const TESTIMONIALS: &[(&str, &str, &str, &str, u8)] = &[
    (
        "1",
        "Yawo Komla",
        "Togo",
        "Produits de qualité et service impeccable ! Je recommande.",
        5,
    ),
    (
        "2",
        "Awa Zongo",
        "Burkina Faso",
        "J'ai trouvé tout ce dont j'avais besoin pour mon bureau. Bravo !",
        4,
    ),
    (
        "3",
        "Kodjo Tchegan",
        "Togo",
        "Super site avec une bonne interface utilisateur.",
        5,
    ),
    (
        "4",
        "Moussa Diabaté",
        "Bénin",
        "Commande rapide et produits authentiques. Merci !",
        4,
    ),
    (
        "5",
        "Mariam Sawadogo",
        "Burkina Faso",
        "Service clientèle très réactif, je suis satisfaite.",
        5,
    ),
];

/// The eight products the shop launches with.
#[must_use]
pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|p| Product {
            id: ProductId::new(p.id),
            name: p.name.to_owned(),
            description: p.description.to_owned(),
            price: Price::new(p.price),
            old_price: p.old_price.map(Price::new),
            image: format!(
                "https://images.unsplash.com/{}?{UNSPLASH_PARAMS}&w={}&q=80",
                p.photo, p.width
            ),
            category: p.category.to_owned(),
            featured: p.featured.then_some(true),
            stock: p.stock,
        })
        .collect()
}

/// Testimonials that are always shown, ahead of submitted ones.
#[must_use]
pub fn testimonials() -> Vec<Testimonial> {
    TESTIMONIALS
        .iter()
        .map(|&(id, name, country, comment, stars)| Testimonial {
            id: TestimonialId::new(id),
            name: name.to_owned(),
            country: country.to_owned(),
            comment: comment.to_owned(),
            rating: Rating::new(i64::from(stars)).unwrap_or_default(),
        })
        .collect()
}
