//! Fixed sample rows shown when a public catalog cannot be loaded.
//!
//! Sample ids are negative so they can never collide with ids issued by
//! the store.

use chrono::{DateTime, Utc};
use techhub_db::models::electronics::ElectronicsProduct;
use techhub_db::models::service::Service;
use techhub_db::models::software::SoftwareProduct;

/// 2024-01-01T00:00:00Z, stamped on every sample row.
const SAMPLE_EPOCH_SECS: i64 = 1_704_067_200;

fn stamp() -> DateTime<Utc> {
    DateTime::from_timestamp(SAMPLE_EPOCH_SECS, 0).unwrap_or_default()
}

fn unsplash(photo: &str) -> Option<String> {
    Some(format!(
        "https://images.unsplash.com/{photo}?auto=format&fit=crop&w=800&q=80"
    ))
}

pub fn software() -> Vec<SoftwareProduct> {
    let rows = [
        (
            "Video Editing Suite",
            "Professional video editing software with advanced features for content creators and video professionals.",
            "Multimedia",
            "photo-1461749280684-dccba630e2f6",
        ),
        (
            "Security Antivirus Pro",
            "Advanced antivirus solution with real-time protection against malware, ransomware, and online threats.",
            "Security",
            "photo-1526374965328-7f61d4dc18c5",
        ),
        (
            "Office Productivity Suite",
            "Complete office productivity solution including word processing, spreadsheets, and presentation tools.",
            "Productivity",
            "photo-1460925895917-afdab827c52f",
        ),
        (
            "Database Management System",
            "Powerful database management system for organizing and analyzing large datasets efficiently.",
            "Development",
            "photo-1487058792275-0ad4aaf24ca7",
        ),
        (
            "Graphic Design Pro",
            "Professional graphic design software with tools for creating stunning visuals, logos, and digital art.",
            "Design",
            "photo-1483058712412-4245e9b90334",
        ),
        (
            "Code Editor IDE",
            "Advanced integrated development environment for coding, debugging, and building applications.",
            "Development",
            "photo-1531297484001-80022131f5a1",
        ),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((title, description, category, photo), n)| SoftwareProduct {
            id: -n,
            title: title.into(),
            description: description.into(),
            category: category.into(),
            image_url: unsplash(photo),
            download_link: None,
            created_at: stamp(),
            updated_at: stamp(),
        })
        .collect()
}

pub fn electronics() -> Vec<ElectronicsProduct> {
    let rows = [
        (
            "Smart LED TV",
            "4K Ultra HD Smart LED TV with HDR and built-in streaming apps.",
            "TVs",
            599.99,
            "55 inch",
            "photo-1593305841991-05c297ba4575",
        ),
        (
            "RGB LED Strip",
            "Customizable RGB LED strip with remote control and app connectivity.",
            "LEDs",
            29.99,
            "5 meter",
            "photo-1586253634026-5f8ff828c8f1",
        ),
        (
            "Curved Gaming Monitor",
            "Ultra-wide curved gaming monitor with high refresh rate and low response time.",
            "Screens",
            349.99,
            "27 inch",
            "photo-1527443224154-c4a3942d3acf",
        ),
        (
            "Digital Signage Display",
            "Commercial-grade digital signage display for businesses and retail environments.",
            "Screens",
            899.99,
            "42 inch",
            "photo-1516321318423-f06f85e504b3",
        ),
        (
            "OLED TV",
            "Premium OLED TV with perfect blacks and vibrant colors for an immersive viewing experience.",
            "TVs",
            1299.99,
            "65 inch",
            "photo-1593784991095-a205069470b6",
        ),
        (
            "Outdoor LED Floodlight",
            "Weatherproof LED floodlight for outdoor security and illumination.",
            "LEDs",
            79.99,
            "30W",
            "photo-1557428894-56bcc97113fe",
        ),
    ];

    rows.into_iter()
        .zip(1..)
        .map(
            |((title, description, category, price, size, photo), n)| ElectronicsProduct {
                id: -n,
                title: title.into(),
                description: description.into(),
                category: category.into(),
                image_url: unsplash(photo),
                price,
                size: size.into(),
                download_link: None,
                created_at: stamp(),
                updated_at: stamp(),
            },
        )
        .collect()
}

pub fn services() -> Vec<Service> {
    let rows = [
        (
            "Software Development",
            "Custom software solutions tailored to your business needs. We develop web applications, mobile apps, and enterprise software with the latest technologies.",
            "code",
        ),
        (
            "Electronics Sales & Repair",
            "High-quality electronics products and professional repair services. We offer LEDs, TVs, screens, and other electronic devices with installation and maintenance.",
            "tv",
        ),
        (
            "IT Consulting",
            "Expert IT consulting services to help you make the right technology decisions. Our consultants provide strategic guidance for digital transformation.",
            "book-open",
        ),
        (
            "Technical Support",
            "Reliable technical support for all your IT needs. Our team provides prompt assistance for hardware and software issues to minimize downtime.",
            "settings",
        ),
        (
            "Network Solutions",
            "Comprehensive network setup and management services. We design, implement, and maintain secure and efficient network infrastructure for businesses.",
            "shield",
        ),
        (
            "Cloud Services",
            "Scalable cloud solutions for modern businesses. We help you migrate to the cloud, optimize cloud resources, and ensure data security.",
            "globe",
        ),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((title, description, icon_name), n)| Service {
            id: -n,
            title: title.into(),
            description: description.into(),
            icon_name: icon_name.into(),
            created_at: stamp(),
            updated_at: stamp(),
        })
        .collect()
}
