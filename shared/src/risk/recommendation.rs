//! Tier-appropriate recommendation text
//!
//! Four mutually exclusive templates, selected in priority order: the
//! aflatoxin override fires regardless of tier, then high, medium, and the
//! low-risk default.

use rust_decimal::Decimal;

use crate::models::RiskLevel;

use super::etcl::EtclClassification;

/// Build the English and Bengali recommendation for a classification,
/// parameterized by the resolved moisture/temperature/ETCL values
pub fn recommend(
    classification: &EtclClassification,
    moisture_percent: Decimal,
    temperature_celsius: Decimal,
) -> (String, String) {
    let m = moisture_percent;
    let t = temperature_celsius;
    let h = classification.etcl_hours;

    if classification.aflatoxin_risk {
        return (
            format!(
                "Urgent: heat and moisture (moisture {m}%, temperature {t}°C) favor \
                 aflatoxin-producing mold. Dry or sell this batch within {h} hours and \
                 keep it away from healthy stock."
            ),
            format!(
                "জরুরি: আর্দ্রতা {m}% ও তাপমাত্রা {t}°সে অবস্থায় আফলাটক্সিন সৃষ্টিকারী ছত্রাকের \
                 ঝুঁকি রয়েছে। {h} ঘণ্টার মধ্যে এই ব্যাচ শুকিয়ে নিন বা বিক্রি করুন এবং ভালো শস্য \
                 থেকে আলাদা রাখুন।"
            ),
        );
    }

    match classification.risk_level {
        RiskLevel::High | RiskLevel::Critical => (
            format!(
                "High risk of moisture damage at {m}% moisture. Dry the batch and improve \
                 ventilation within the next {h} hours."
            ),
            format!(
                "আর্দ্রতা {m}% হওয়ায় শস্য নষ্ট হওয়ার উচ্চ ঝুঁকি রয়েছে। আগামী {h} ঘণ্টার মধ্যে \
                 ব্যাচ শুকিয়ে নিন এবং বাতাস চলাচল বাড়ান।"
            ),
        ),
        RiskLevel::Medium => (
            format!(
                "Conditions need attention (moisture {m}%, temperature {t}°C). Increase \
                 ventilation and re-check this batch within {h} hours."
            ),
            format!(
                "পরিস্থিতিতে নজর দেওয়া প্রয়োজন (আর্দ্রতা {m}%, তাপমাত্রা {t}°সে)। বাতাস চলাচল \
                 বাড়ান এবং {h} ঘণ্টার মধ্যে ব্যাচটি আবার পরীক্ষা করুন।"
            ),
        ),
        RiskLevel::Low => (
            format!(
                "Storage conditions are favorable. Continue routine monitoring; the next \
                 critical window is at least {h} hours away."
            ),
            format!(
                "সংরক্ষণ পরিস্থিতি অনুকূল। নিয়মিত পর্যবেক্ষণ চালিয়ে যান; পরবর্তী ঝুঁকির সময়সীমা \
                 অন্তত {h} ঘণ্টা দূরে।"
            ),
        ),
    }
}
