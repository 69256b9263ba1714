//! Which detail fields are shown for the current record.
//!
//! Every section follows the same rule: a detail box is shown only while its companion
//! checkbox is ticked. Unticking hides the detail but keeps what was typed, so ticking again
//! brings the same text back. Nothing here changes the record.

use crate::path::FieldPath;
use crate::record::PatientRecord;
use crate::schema::Section;
use crate::value::FormValue;
use derma_types::Sex;

/// A condition a [`DetailRule`] needs before its detail is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    /// At least one of these fields of the rule's section is ticked (`group.field` allowed).
    AnyFlag(&'static [&'static str]),
    /// The identity section's sex selector holds this value.
    SexIs(Sex),
}

/// A detail field (or whole group) and the conditions that reveal it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailRule {
    pub section: Section,
    pub detail: &'static str,
    pub when: &'static [Condition],
}

/// A flag/detail pair as seen by the form.
#[derive(Clone, Debug, PartialEq)]
pub struct FlaggedDetail {
    pub enabled: bool,
    pub detail: FormValue,
}

impl FlaggedDetail {
    /// The detail, only while it is enabled.
    pub fn shown(&self) -> Option<&FormValue> {
        self.enabled.then_some(&self.detail)
    }
}

macro_rules! rule {
    ($section:ident, [$($flag:literal),+] => $detail:literal) => {
        DetailRule {
            section: Section::$section,
            detail: $detail,
            when: &[Condition::AnyFlag(&[$($flag),+])],
        }
    };
    ($section:ident, female, [$($flag:literal),+] => $detail:literal) => {
        DetailRule {
            section: Section::$section,
            detail: $detail,
            when: &[Condition::SexIs(Sex::Female), Condition::AnyFlag(&[$($flag),+])],
        }
    };
    ($section:ident, female => $detail:literal) => {
        DetailRule {
            section: Section::$section,
            detail: $detail,
            when: &[Condition::SexIs(Sex::Female)],
        }
    };
}

pub static DETAIL_RULES: &[DetailRule] = &[
    rule!(History, ["itchy", "nonItchy"] => "itchyDetails"),
    rule!(History, ["treatmentTaken"] => "treatmentDetails"),
    rule!(History, ["treatmentTaken"] => "treatmentSources"),
    rule!(History, ["medicationOthers"] => "medicationOthersDetails"),
    rule!(History, ["investigationDone"] => "investigations"),
    rule!(History, ["investigationDone"] => "investigationDetails"),
    rule!(History, ["medicalIllnesses"] => "medicalIllnessesDetails"),
    rule!(History, ["surgicalIllnesses"] => "surgicalIllnessesDetails"),
    rule!(History, ["vaccines"] => "vaccinesDetails"),
    rule!(History, ["drugAllergy"] => "drugAllergyDetails"),
    rule!(History, ["foodAllergy"] => "foodAllergyDetails"),
    rule!(History, ["otherAllergies"] => "otherAllergiesDetails"),
    rule!(History, ["concomitantMedication"] => "concomitantMedicationDetails"),
    rule!(History, ["longTermMedication.hp"] => "longTermMedication.hpDetails"),
    rule!(History, ["longTermMedication.dm"] => "longTermMedication.dmDetails"),
    rule!(History, ["longTermMedication.pt"] => "longTermMedication.ptDetails"),
    rule!(History, ["longTermMedication.ep"] => "longTermMedication.epDetails"),
    rule!(FamilyHistory, ["skinDisease"] => "skinDiseaseDetails"),
    rule!(FamilyHistory, ["similarDisease"] => "similarDiseaseDetails"),
    rule!(FamilyHistory, ["diabetes"] => "diabetesDetails"),
    rule!(SocialHistory, ["exposure"] => "exposureDetails"),
    rule!(SocialHistory, ["riskSTD"] => "riskSTDDetails"),
    rule!(SocialHistory, female => "maritalStatus"),
    rule!(SocialHistory, female => "pregnant"),
    rule!(SocialHistory, female, ["pregnant"] => "pregnantDetails"),
    rule!(SocialHistory, female => "breastFeeding"),
    rule!(SocialHistory, female, ["breastFeeding"] => "breastFeedingDetails"),
    rule!(SocialHistory, female => "childrenMale"),
    rule!(SocialHistory, female => "childrenFemale"),
    rule!(SocialHistory, female => "menstruating"),
    rule!(SocialHistory, female, ["menstruating"] => "menstruatingDetails"),
    rule!(Gpe, ["lymphNodes"] => "lymphNodesDetails"),
    rule!(AcuteIllness, ["present"] => "details"),
    rule!(ChronicIllness, ["present"] => "details"),
    rule!(SystemsReview, ["rs"] => "rsDetails"),
    rule!(SystemsReview, ["cvs"] => "cvsDetails"),
    rule!(SystemsReview, ["cns"] => "cnsDetails"),
    rule!(SystemsReview, ["pa"] => "paDetails"),
    rule!(DermatologicExam, ["pigmentation"] => "pigmentationType"),
    rule!(DermatologicExam, ["hasSpecialSigns"] => "specialSigns"),
    rule!(DermatologicExam, ["conjunctivaInvolved"] => "conjunctivaDetails"),
    rule!(DermatologicExam, ["mouthInvolved"] => "mouthDetails"),
    rule!(DermatologicExam, ["scalpInvolved"] => "scalpDetails"),
    rule!(DermatologicExam, ["hairInvolved"] => "hairDetails"),
    rule!(DermatologicExam, ["nailsInvolved"] => "nailsDetails"),
];

impl Condition {
    fn holds(&self, record: &PatientRecord, section: Section) -> bool {
        match self {
            Condition::AnyFlag(flags) => flags.iter().any(|flag| {
                FieldPath::parse(flag)
                    .ok()
                    .and_then(|path| record.nested(section.key(), &path).map(FormValue::is_truthy))
                    .unwrap_or(false)
            }),
            Condition::SexIs(sex) => record.sex() == Some(*sex),
        }
    }
}

impl DetailRule {
    /// Path of the detail inside the rule's section.
    pub fn detail_path(&self) -> FieldPath {
        FieldPath::parse(self.detail).unwrap_or_else(|_| FieldPath::field(self.detail))
    }

    /// Whether every condition holds for `record`.
    pub fn is_visible(&self, record: &PatientRecord) -> bool {
        self.when.iter().all(|c| c.holds(record, self.section))
    }

    /// The rule's flag/detail pair for `record`. Absent details read as empty text.
    pub fn flagged_detail(&self, record: &PatientRecord) -> FlaggedDetail {
        let detail = record
            .nested(self.section.key(), &self.detail_path())
            .cloned()
            .unwrap_or_else(FormValue::empty_text);
        FlaggedDetail {
            enabled: self.is_visible(record),
            detail,
        }
    }
}

/// Rules for one section.
pub fn rules_for(section: Section) -> impl Iterator<Item = &'static DetailRule> {
    DETAIL_RULES.iter().filter(move |rule| rule.section == section)
}

/// Detail fields currently shown, with their values.
pub fn visible_details(record: &PatientRecord) -> Vec<(&'static DetailRule, FormValue)> {
    DETAIL_RULES
        .iter()
        .filter_map(|rule| {
            let pair = rule.flagged_detail(record);
            pair.shown().cloned().map(|detail| (rule, detail))
        })
        .collect()
}
