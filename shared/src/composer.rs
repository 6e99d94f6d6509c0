//! Message composition for LINE broadcasts
//!
//! Findings are rendered into text blocks, then joined under a header that
//! names the location and when the data was retrieved. Thai is the primary
//! language; English is available for testing and non-Thai channels.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Finding, HeatFinding, RainCategory, RainFinding};
use crate::time::format_clock;
use crate::types::Language;

/// Line placed between finding blocks
pub const BLOCK_SEPARATOR: &str = "\n\n- - - - - - - - - - - - - - -\n\n";

/// Location pin shown in the message header
pub const LOCATION_PIN: &str = "📍";

/// Render every finding, preserving order
pub fn render_blocks(findings: &[Finding], language: Language) -> Vec<String> {
    findings
        .iter()
        .map(|finding| render_finding(finding, language))
        .collect()
}

/// Render one finding as a message block
pub fn render_finding(finding: &Finding, language: Language) -> String {
    match finding {
        Finding::Heat(heat) => render_heat(heat, language),
        Finding::Rain(rain) => render_rain(rain, language),
    }
}

fn render_heat(heat: &HeatFinding, language: Language) -> String {
    let temp = fixed(heat.max_temp_celsius, 1);
    let uv_line = heat.uv_index.map(|uv| fixed(uv, 1));

    match language {
        Language::Thai => {
            let mut block = format!(
                "☀️ *วันนี้แดดแรงเฟร่อ!*\n\n🥵 อากาศร้อนสุดๆ แตะ {}°C",
                temp
            );
            if let Some(uv) = uv_line {
                block.push_str(&format!("\n👿 ตัวร้าย UV แรงถึง {}", uv));
            }
            block.push_str("\n\nคำแนะนำ: ทากันแดด พกร่มด้วยน้า~ อยู่ในที่ร่มดีที่สุดจ้า 😎");
            block
        }
        Language::English => {
            let mut block = format!(
                "☀️ *Scorching sun today!*\n\n🥵 Temperatures reaching {}°C",
                temp
            );
            if let Some(uv) = uv_line {
                block.push_str(&format!("\n👿 UV index as high as {}", uv));
            }
            block.push_str("\n\nTip: wear sunscreen, carry an umbrella and stay in the shade 😎");
            block
        }
    }
}

fn render_rain(rain: &RainFinding, language: Language) -> String {
    let time = format_clock(&rain.local_time, language);
    let description = describe_rain(rain, language);

    match language {
        Language::Thai => format!(
            "☔️ *เตรียมร่มด่วน! ฝนกำลังมา!*\n\n⏰ คาดว่าจะเริ่มตกช่วง *{}*\nลักษณะ: {}\n\nคำแนะนำ: เก็บผ้าที่ตากด่วน! ใครจะกลับบ้านรีบเลยน้า 👕👖",
            time, description
        ),
        Language::English => format!(
            "☔️ *Umbrella time! Rain is coming!*\n\n⏰ Expected to start around *{}*\nConditions: {}\n\nTip: bring the laundry in and head home early 👕👖",
            time, description
        ),
    }
}

/// Short description of a rain finding with its probability, e.g. `"ฝนตกหนักมว๊ากก 🌧️ (60%)"`
pub fn describe_rain(rain: &RainFinding, language: Language) -> String {
    let pop = format!("({}%)", fixed(rain.pop_percent, 0));

    let phrase = match (rain.category, language) {
        (RainCategory::Thunderstorm, Language::Thai) => "ระวัง! มีพายุเข้า ⛈️",
        (RainCategory::Thunderstorm, Language::English) => "Storm warning! ⛈️",
        (RainCategory::HeavyRain, Language::Thai) => "ฝนตกหนักมว๊ากก 🌧️",
        (RainCategory::HeavyRain, Language::English) => "Heavy rain 🌧️",
        (RainCategory::ModerateRain, Language::Thai) => "ฝนตกปานกลางนะ 💧",
        (RainCategory::ModerateRain, Language::English) => "Moderate rain 💧",
        (RainCategory::Other, _) => rain.provider_description.as_str(),
    };

    format!("{} {}", phrase, pop)
}

/// Join rendered blocks under a location header
///
/// Returns `None` when there is nothing to send.
pub fn compose_message(
    blocks: &[String],
    location_name: &str,
    retrieved_at: &str,
    language: Language,
) -> Option<String> {
    if blocks.is_empty() {
        return None;
    }

    let header = match language {
        Language::Thai => format!(
            "{} อัปเดตอากาศ | {}\n(ข้อมูลล่าสุด {})",
            LOCATION_PIN, location_name, retrieved_at
        ),
        Language::English => format!(
            "{} Weather update | {}\n(Data as of {})",
            LOCATION_PIN, location_name, retrieved_at
        ),
    };

    Some(format!("\n{}\n\n{}", header, blocks.join(BLOCK_SEPARATOR)))
}

/// Render findings and compose them in one step
pub fn compose_notification(
    findings: &[Finding],
    location_name: &str,
    retrieved_at: &str,
    language: Language,
) -> Option<String> {
    compose_message(
        &render_blocks(findings, language),
        location_name,
        retrieved_at,
        language,
    )
}

/// Format a decimal with exactly `dp` fractional digits
fn fixed(value: Decimal, dp: u32) -> String {
    let mut value = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(dp);
    value.to_string()
}
