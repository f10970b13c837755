//! Snapshot and asset builders shared by the integration tests.

use fieldreport::{Boiler, ClosedLoop, ReportSnapshot, ServiceFrequency, SupportSystem};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// A filled-in weekly visit with readings both in and out of range.
pub fn north_plant() -> ReportSnapshot {
    let mut boiler = Boiler::new("Boiler 1");
    boiler.ph = "11.6".into();
    boiler.so3 = "45".into();
    boiler.p_alk = "420".into();
    boiler.m_alk = "910".into();
    boiler.oh_alk = "350".into();
    boiler.cond = "3500".into();
    boiler.fluor = "250".into();
    boiler.notes = "Blowdown timer reset".into();

    let mut da = SupportSystem::new("DA");
    da.cond = "110".into();
    da.ph = "8.8".into();
    da.trh = "0".into();

    let mut softener = SupportSystem::new("Softener");
    softener.trh = "3".into();
    softener.notes = "Regenerated on site".into();

    let mut closed_loop = ClosedLoop::new("Loop 1");
    closed_loop.ph = "9.2".into();
    closed_loop.cond = "1800".into();
    closed_loop.no2_hot = "1100".into();
    closed_loop.no2_cold = "700".into();

    ReportSnapshot {
        date: "2024-03-05".into(),
        site_name: "North Plant".into(),
        address: "100 Industrial Pkwy, Jasper, IN".into(),
        contact_name: "Dana Smith".into(),
        contact_phone: "(812) 555-0100".into(),
        technician: "Alex Reyes".into(),
        service_frequency: ServiceFrequency::Weekly,
        include_cover_page: true,
        boilers: vec![boiler],
        support_systems: vec![da, softener],
        closed_loops: vec![closed_loop],
        general_notes: "All chemical feed pumps verified.".into(),
    }
}

/// Default snapshot with a fixed date and every optional field blank.
pub fn blank_snapshot() -> ReportSnapshot {
    ReportSnapshot {
        date: "2024-03-05".into(),
        ..Default::default()
    }
}

pub fn snapshot_with_boilers(count: usize) -> ReportSnapshot {
    ReportSnapshot {
        boilers: (1..=count)
            .map(|i| {
                let mut boiler = Boiler::new(format!("Boiler {}", i));
                boiler.ph = format!("11.{}", i % 10);
                boiler
            })
            .collect(),
        ..north_plant()
    }
}

pub fn long_notes(paragraphs: usize) -> String {
    (1..=paragraphs)
        .map(|i| {
            format!(
                "Visit note {}: inspected the condensate return, verified the chemical feed \
                 pump stroke settings and recorded the test results above.",
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A small PNG with a transparent background pixel.
pub fn logo_png() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(8, 3, Rgba([30, 58, 95, 255]));
    img.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode test logo");
    buf
}
