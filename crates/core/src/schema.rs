//! Canonical shape of the dermatology intake record.
//!
//! Field names follow the camel-case keys used by the form widgets. Where earlier revisions
//! of the form disagreed, the canonical names are `sex` (not `gender`) and
//! `reviewOfFinalDiagnosis` (not `reviewFinalDiagnosis`).

use crate::record::PatientRecord;
use crate::value::{FormValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level text fields, in form order.
pub const TOP_LEVEL_TEXT: &[&str] = &[
    "name",
    "age",
    "sex",
    "phone",
    "fileNo",
    "date",
    "complaints",
    "duration",
    "provisionalDiagnosis",
    "histopathologicalDiagnosis",
    "workingDiagnosis",
    "treatmentPrescribed",
];

/// A named sub-record of the patient record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    History,
    FamilyHistory,
    SocialHistory,
    Gpe,
    AcuteIllness,
    ChronicIllness,
    SystemsReview,
    DermatologicExam,
    SpecialProcedures,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::History,
        Section::FamilyHistory,
        Section::SocialHistory,
        Section::Gpe,
        Section::AcuteIllness,
        Section::ChronicIllness,
        Section::SystemsReview,
        Section::DermatologicExam,
        Section::SpecialProcedures,
    ];

    /// Record key of the section.
    pub const fn key(self) -> &'static str {
        match self {
            Section::History => "history",
            Section::FamilyHistory => "familyHistory",
            Section::SocialHistory => "socialHistory",
            Section::Gpe => "gpe",
            Section::AcuteIllness => "acuteIllness",
            Section::ChronicIllness => "chronicIllness",
            Section::SystemsReview => "systemsReview",
            Section::DermatologicExam => "dermatologicExam",
            Section::SpecialProcedures => "specialProcedures",
        }
    }

    /// Leaves and groups present in a fresh record.
    pub fn layout(self) -> &'static SectionLayout {
        match self {
            Section::History => &HISTORY,
            Section::FamilyHistory => &FAMILY_HISTORY,
            Section::SocialHistory => &SOCIAL_HISTORY,
            Section::Gpe => &GPE,
            Section::AcuteIllness | Section::ChronicIllness => &ILLNESS_SYNDROME,
            Section::SystemsReview => &SYSTEMS_REVIEW,
            Section::DermatologicExam => &DERMATOLOGIC_EXAM,
            Section::SpecialProcedures => &SPECIAL_PROCEDURES,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A top-level list edited item by item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatableList {
    DifferentialDiagnosis,
    FinalDiagnosis,
    ReviewOfFinalDiagnosis,
    TreatmentRecords,
    ClinicalPhotos,
}

impl RepeatableList {
    pub const ALL: [RepeatableList; 5] = [
        RepeatableList::DifferentialDiagnosis,
        RepeatableList::FinalDiagnosis,
        RepeatableList::ReviewOfFinalDiagnosis,
        RepeatableList::TreatmentRecords,
        RepeatableList::ClinicalPhotos,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            RepeatableList::DifferentialDiagnosis => "differentialDiagnosis",
            RepeatableList::FinalDiagnosis => "finalDiagnosis",
            RepeatableList::ReviewOfFinalDiagnosis => "reviewOfFinalDiagnosis",
            RepeatableList::TreatmentRecords => "treatmentRecords",
            RepeatableList::ClinicalPhotos => "clinicalPhotos",
        }
    }

    /// Fields of a record item, empty for lists of plain text.
    pub const fn item_fields(self) -> &'static [&'static str] {
        match self {
            RepeatableList::DifferentialDiagnosis | RepeatableList::FinalDiagnosis => &[],
            RepeatableList::ReviewOfFinalDiagnosis => &["date", "notes"],
            RepeatableList::TreatmentRecords => &["date", "observation", "action"],
            RepeatableList::ClinicalPhotos => &["date", "caption"],
        }
    }

    /// The item added by the "Add" button: empty text, or a record with blank fields.
    pub fn default_item(self) -> FormValue {
        match self.item_fields() {
            [] => FormValue::empty_text(),
            fields => FormValue::from(blank_texts(fields)),
        }
    }
}

impl fmt::Display for RepeatableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A group of leaves nested inside a section.
#[derive(Debug)]
pub struct GroupLayout {
    pub key: &'static str,
    pub flags: &'static [&'static str],
    pub texts: &'static [&'static str],
}

/// Leaves and groups of one section.
#[derive(Debug)]
pub struct SectionLayout {
    pub flags: &'static [&'static str],
    pub texts: &'static [&'static str],
    pub groups: &'static [GroupLayout],
}

impl SectionLayout {
    fn blank(&self) -> Record {
        let mut record = blank_flags(self.flags);
        for text in self.texts {
            record.insert(*text, FormValue::empty_text());
        }
        for group in self.groups {
            let mut fields = blank_flags(group.flags);
            for text in group.texts {
                fields.insert(*text, FormValue::empty_text());
            }
            record.insert(group.key, fields);
        }
        record
    }
}

pub const BASIC_LESIONS: &[&str] = &[
    "papuleComedone",
    "pustule",
    "macule",
    "purpura",
    "pits",
    "patch",
    "induration",
    "infarction",
    "infiltration",
    "cyst",
    "alopecia",
    "atrophy",
    "erythema",
    "edema",
    "hyperkeratosis",
    "nailDystrophy",
    "discolouration",
    "nodule",
    "sclerosis",
    "telangiectasis",
    "tumor",
    "ulcer",
    "poikiloderma",
    "xerosis",
    "vesicle",
    "wheal",
];

pub const SHAPES: &[&str] = &[
    "Annular",
    "Arciform",
    "Asheaf",
    "Circinate",
    "Elliptical",
    "Linear",
    "Maplike",
    "Oval",
    "Round",
    "Square",
    "Target",
    "Triangular",
    "Umbilicated",
];

pub const ARRANGEMENTS: &[&str] = &[
    "Annular",
    "Arciform",
    "Corymbiform",
    "Grouped",
    "Herpetiform",
    "Linear",
    "Polycyclic",
    "Reticular",
    "Scattered",
    "Zosteriform",
];

pub const DISTRIBUTIONS: &[&str] = &[
    "Bilateral",
    "Generalised",
    "Localised",
    "Regional",
    "Unilateral",
    "Universal",
];

pub const PATTERNS: &[&str] = &[
    "Circle of Hebra",
    "Exposed / Covered",
    "Flexures",
    "Intertriginous areas",
    "Photo distribution",
    "Pressure sites",
    "Seborrheic",
    "Symmetrical",
    "Asymmetrical",
];

pub const AREAS_INVOLVED: &[&str] = &[
    "Anal",
    "Beard",
    "Dermatomal",
    "Flexural",
    "Extensor",
    "Genital",
    "Glabrous",
    "Head & Neck",
    "Intertriginous",
    "Lower extremities",
    "Palms & Soles",
    "Trunk",
    "Upper extremities",
];

pub const COLORS: &[&str] = &[
    "Black",
    "Blue",
    "Brown",
    "Cream",
    "Dusky Red",
    "Erythema",
    "Green",
    "Grey",
    "Off White",
    "Orange",
    "Pink",
    "Purple",
    "Skin",
    "Violaceous",
    "White",
    "Yellow",
];

pub const PALPATION: &[&str] = &[
    "Doughy",
    "Firm",
    "Hard",
    "Indurated",
    "Mobile",
    "Fixed",
    "Soft",
    "Tender",
    "Non-tender",
];

pub const ANATOMIC_COMPONENTS: &[&str] = &["Appendageal", "Dermal", "Epidermal", "Subcutaneous"];

/// Sites with an "involved" checkbox and a details box in the dermatologic exam.
pub const INVOLVEMENT_SITES: &[&str] = &["conjunctiva", "mouth", "scalp", "hair", "nails"];

static HISTORY: SectionLayout = SectionLayout {
    flags: &[
        "itchy",
        "nonItchy",
        "treatmentTaken",
        "medicationOthers",
        "investigationDone",
        "medicalIllnesses",
        "surgicalIllnesses",
        "vaccines",
        "drugAllergy",
        "foodAllergy",
        "otherAllergies",
        "wheezingIllness",
        "sneezingIllness",
        "concomitantMedication",
    ],
    texts: &[
        "itchyDetails",
        "whereStarted",
        "howSpread",
        "evolutionLesions",
        "anatomicalSpread",
        "treatmentDetails",
        "medicationOthersDetails",
        "investigationDetails",
        "provocativeFactors",
        "relievingFactors",
        "medicalIllnessesDetails",
        "surgicalIllnessesDetails",
        "vaccinesDetails",
        "drugAllergyDetails",
        "foodAllergyDetails",
        "otherAllergiesDetails",
        "currentMedication",
        "concomitantMedicationDetails",
    ],
    groups: &[
        GroupLayout {
            key: "treatmentSources",
            flags: &[
                "gp",
                "derm",
                "ayurveda",
                "unani",
                "homeo",
                "sidha",
                "herbal",
                "naturopathy",
                "beautician",
                "self",
            ],
            texts: &[],
        },
        GroupLayout {
            key: "investigations",
            flags: &["dna", "nad", "na", "nr", "no", "sbpr", "sats"],
            texts: &[],
        },
        GroupLayout {
            key: "longTermMedication",
            flags: &["hp", "dm", "pt", "ep"],
            texts: &["hpDetails", "dmDetails", "ptDetails", "epDetails"],
        },
    ],
};

static FAMILY_HISTORY: SectionLayout = SectionLayout {
    flags: &["skinDisease", "similarDisease", "diabetes"],
    texts: &["skinDiseaseDetails", "similarDiseaseDetails", "diabetesDetails"],
    groups: &[],
};

static SOCIAL_HISTORY: SectionLayout = SectionLayout {
    flags: &["exposure", "riskSTD", "pregnant", "breastFeeding", "menstruating"],
    texts: &[
        "occupation",
        "hobbies",
        "address",
        "exposureDetails",
        "riskSTDDetails",
        "travel",
        "maritalStatus",
        "pregnantDetails",
        "breastFeedingDetails",
        "childrenMale",
        "childrenFemale",
        "menstruatingDetails",
    ],
    groups: &[],
};

static GPE: SectionLayout = SectionLayout {
    flags: &["lymphNodes", "hepatomegaly", "splenomegaly"],
    texts: &[
        "temperature",
        "respiration",
        "bodyArea",
        "pulse",
        "height",
        "bp",
        "weight",
        "lymphNodesDetails",
    ],
    groups: &[],
};

static ILLNESS_SYNDROME: SectionLayout = SectionLayout {
    flags: &["present"],
    texts: &["details"],
    groups: &[],
};

static SYSTEMS_REVIEW: SectionLayout = SectionLayout {
    flags: &["rs", "cvs", "cns", "pa"],
    texts: &["rsDetails", "cvsDetails", "cnsDetails", "paDetails"],
    groups: &[],
};

static DERMATOLOGIC_EXAM: SectionLayout = SectionLayout {
    flags: &[
        "crust",
        "eczemaAcute",
        "eczemaSubacute",
        "eczemaChronic",
        "exudation",
        "excoriation",
        "erosion",
        "fissure",
        "gangrene",
        "lichenification",
        "pigmentation",
        "hasSpecialSigns",
        "conjunctivaInvolved",
        "mouthInvolved",
        "scalpInvolved",
        "hairInvolved",
        "nailsInvolved",
    ],
    texts: &[
        "scarType",
        "otherLesion",
        "briefDescription",
        "specialSigns",
        "appearance",
        "lesionSize",
        "border",
        "otherColor",
        "diascopy",
        "conjunctivaDetails",
        "mouthDetails",
        "scalpDetails",
        "hairDetails",
        "nailsDetails",
    ],
    groups: &[
        GroupLayout {
            key: "basicLesions",
            flags: BASIC_LESIONS,
            texts: &[],
        },
        GroupLayout {
            key: "pigmentationType",
            flags: &["hyper", "hypo", "diffuse", "mottled"],
            texts: &[],
        },
        GroupLayout {
            key: "scales",
            flags: &[],
            texts: &["type", "adherence", "amount", "color"],
        },
        GroupLayout {
            key: "shapes",
            flags: SHAPES,
            texts: &[],
        },
        GroupLayout {
            key: "arrangements",
            flags: ARRANGEMENTS,
            texts: &[],
        },
        GroupLayout {
            key: "distributions",
            flags: DISTRIBUTIONS,
            texts: &[],
        },
        GroupLayout {
            key: "patterns",
            flags: PATTERNS,
            texts: &[],
        },
        GroupLayout {
            key: "areasInvolved",
            flags: AREAS_INVOLVED,
            texts: &[],
        },
        GroupLayout {
            key: "colors",
            flags: COLORS,
            texts: &[],
        },
        GroupLayout {
            key: "palpation",
            flags: PALPATION,
            texts: &[],
        },
        GroupLayout {
            key: "anatomicComponents",
            flags: ANATOMIC_COMPONENTS,
            texts: &[],
        },
    ],
};

static SPECIAL_PROCEDURES: SectionLayout = SectionLayout {
    flags: &[
        "biopsy",
        "gramsStain",
        "kohMount",
        "tzanckSmear",
        "culture",
        "phototest",
        "photopatchTest",
        "slitSmear",
        "crushSmear",
        "prickTest",
        "shortContactPatch",
        "urticariaTests",
        "patchTest",
    ],
    texts: &["procedureNotes"],
    groups: &[],
};

fn blank_flags(keys: &[&str]) -> Record {
    keys.iter().map(|key| (*key, false)).collect()
}

fn blank_texts(keys: &[&str]) -> Record {
    keys.iter().map(|key| (*key, "")).collect()
}

/// A fresh record: every known leaf at its default, every list empty.
pub fn blank_record() -> PatientRecord {
    let mut root = blank_texts(TOP_LEVEL_TEXT);
    for section in Section::ALL {
        root.insert(section.key(), section.layout().blank());
    }
    for list in RepeatableList::ALL {
        root.insert(list.key(), FormValue::empty_list());
    }
    PatientRecord::from_root(root)
}
