use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::models::Disease;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog load failed ({0}): {1}")]
    Load(String, String),

    #[error("Catalog parse failed: {0}")]
    Parse(String),

    #[error("Duplicate disease in catalog: {0}")]
    DuplicateDisease(String),

    #[error("Disease {0} has no symptoms")]
    NoSymptoms(String),

    #[error("Disease {0} has clarifying questions for {1}, which is not one of its symptoms")]
    OrphanQuestions(String, String),
}

/// Read-only disease catalog. Built once at startup, immutable afterwards.
/// Iteration order is definition order and is load-bearing: screening
/// results and questionnaires follow it.
#[derive(Debug)]
pub struct DiseaseCatalog {
    diseases: Vec<Disease>,
    index: HashMap<String, usize>,
}

impl DiseaseCatalog {
    /// Build a catalog, validating every entry:
    /// unique names, at least one symptom each (duplicates dropped), and no
    /// clarifying questions attached to a symptom the disease does not have.
    pub fn from_diseases(diseases: Vec<Disease>) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        let mut validated = Vec::with_capacity(diseases.len());

        for mut disease in diseases {
            if index.contains_key(&disease.name) {
                return Err(CatalogError::DuplicateDisease(disease.name));
            }

            let mut seen = Vec::with_capacity(disease.symptoms.len());
            for symptom in disease.symptoms.drain(..) {
                if !seen.contains(&symptom) {
                    seen.push(symptom);
                }
            }
            disease.symptoms = seen;

            if disease.symptoms.is_empty() {
                return Err(CatalogError::NoSymptoms(disease.name));
            }

            for symptom in disease.detailed_questions.keys() {
                if !disease.has_symptom(symptom) {
                    return Err(CatalogError::OrphanQuestions(
                        disease.name.clone(),
                        symptom.clone(),
                    ));
                }
            }

            index.insert(disease.name.clone(), validated.len());
            validated.push(disease);
        }

        Ok(Self {
            diseases: validated,
            index,
        })
    }

    /// Load a catalog from a JSON file (an array of diseases).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Load(path.display().to_string(), e.to_string()))?;
        let diseases: Vec<Disease> =
            serde_json::from_str(&json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_diseases(diseases)
    }

    /// Look up a disease by exact name.
    pub fn get(&self, name: &str) -> Option<&Disease> {
        self.index.get(name).map(|&i| &self.diseases[i])
    }

    /// All diseases in definition order.
    pub fn all(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    /// Union of all catalog symptoms, in first-seen catalog order.
    /// This is the question order for the bulk screening flow.
    pub fn symptom_vocabulary(&self) -> Vec<String> {
        let mut vocabulary: Vec<String> = Vec::new();
        for disease in &self.diseases {
            for symptom in &disease.symptoms {
                if !vocabulary.contains(symptom) {
                    vocabulary.push(symptom.clone());
                }
            }
        }
        vocabulary
    }

    /// The builtin dental catalog (no file I/O). Also used by tests.
    pub fn builtin() -> Self {
        let diseases = vec![
            Disease {
                name: "Cavities".into(),
                symptoms: vec![
                    "tooth pain".into(),
                    "sensitivity to sweets".into(),
                    "visible holes".into(),
                ],
                detailed_questions: HashMap::from([
                    (
                        "tooth pain".to_string(),
                        vec![
                            "Do you experience sharp, sudden pain when biting down?".to_string(),
                            "Does the pain worsen when eating hot or cold foods?".to_string(),
                            "Do you feel persistent aching in a specific tooth?".to_string(),
                            "Does the pain keep you awake at night?".to_string(),
                        ],
                    ),
                    (
                        "sensitivity to sweets".to_string(),
                        vec![
                            "Do you experience pain when eating sugary foods?".to_string(),
                            "Do your teeth hurt when consuming cold or sweet drinks?".to_string(),
                            "Do you feel a sharp sensation when something sweet touches your teeth?"
                                .to_string(),
                        ],
                    ),
                    (
                        "visible holes".to_string(),
                        vec![
                            "Have you noticed any dark spots or holes in your teeth?".to_string(),
                            "Can you see any discoloration or chipped areas in your teeth?"
                                .to_string(),
                            "When you run your tongue over your teeth, do you feel any rough or uneven surfaces?"
                                .to_string(),
                        ],
                    ),
                ]),
                treatment: "Dental fillings to remove the decayed part, crowns for extensive \
                            cavities, fluoride treatments to strengthen enamel, and preventive \
                            care: brushing twice daily with fluoride toothpaste and reducing \
                            sugary foods and drinks."
                    .into(),
            },
            Disease {
                name: "Tooth Sensitivity".into(),
                symptoms: vec!["tooth pain".into(), "sensitivity to sweets".into()],
                detailed_questions: HashMap::from([
                    (
                        "tooth pain".to_string(),
                        vec![
                            "Do you experience sharp, quick pain when exposed to cold or hot temperatures?"
                                .to_string(),
                            "Does brushing or flossing cause discomfort?".to_string(),
                            "Do you experience pain when breathing in cold air?".to_string(),
                            "Is the pain localized to a specific tooth or area?".to_string(),
                        ],
                    ),
                    (
                        "sensitivity to sweets".to_string(),
                        vec![
                            "Do sweet foods cause a sudden, sharp pain?".to_string(),
                            "Do you avoid certain foods due to sensitivity?".to_string(),
                            "Does the pain subside quickly after the stimulus is removed?"
                                .to_string(),
                        ],
                    ),
                ]),
                treatment: "Desensitizing toothpaste, fluoride treatments applied by a dentist, \
                            dental bonding over exposed roots, and nightguards for teeth \
                            grinding."
                    .into(),
            },
            Disease {
                name: "Tooth Abscess".into(),
                symptoms: vec![
                    "tooth pain".into(),
                    "swollen gums".into(),
                    "bad breath".into(),
                ],
                detailed_questions: HashMap::from([
                    (
                        "tooth pain".to_string(),
                        vec![
                            "Do you experience severe, throbbing pain?".to_string(),
                            "Does the pain worsen when you lie down?".to_string(),
                            "Do you feel pain when touching the affected area?".to_string(),
                            "Is the pain constant or intermittent?".to_string(),
                        ],
                    ),
                    (
                        "swollen gums".to_string(),
                        vec![
                            "Are your gums red and swollen?".to_string(),
                            "Do you notice any pus around the affected tooth?".to_string(),
                            "Is there a painful bump or abscess on your gums?".to_string(),
                            "Do your gums feel tender to touch?".to_string(),
                        ],
                    ),
                    (
                        "bad breath".to_string(),
                        vec![
                            "Do people comment on your bad breath?".to_string(),
                            "Do you have a persistent bad taste in your mouth?".to_string(),
                            "Does the bad breath persist even after brushing?".to_string(),
                            "Do you notice an unpleasant odor when you exhale?".to_string(),
                        ],
                    ),
                ]),
                treatment: "Root canal therapy to remove the infection, incision and drainage \
                            if necessary, antibiotics if the infection has spread, and tooth \
                            extraction in severe cases."
                    .into(),
            },
            Disease {
                name: "Gingivitis".into(),
                symptoms: vec![
                    "bleeding gums".into(),
                    "swollen gums".into(),
                    "bad breath".into(),
                ],
                detailed_questions: HashMap::from([
                    (
                        "bleeding gums".to_string(),
                        vec![
                            "Do your gums bleed when brushing or flossing?".to_string(),
                            "Do you see blood on your toothbrush or dental floss?".to_string(),
                            "Do your gums bleed easily when touched?".to_string(),
                            "Do you notice bleeding when eating hard foods?".to_string(),
                        ],
                    ),
                    (
                        "swollen gums".to_string(),
                        vec![
                            "Are your gums puffy or enlarged?".to_string(),
                            "Do your gums appear red instead of pink?".to_string(),
                            "Do your gums feel tender or painful?".to_string(),
                            "Do you notice any changes in gum texture?".to_string(),
                        ],
                    ),
                    (
                        "bad breath".to_string(),
                        vec![
                            "Do you have persistent bad breath?".to_string(),
                            "Do people comment on an unpleasant odor from your mouth?".to_string(),
                            "Does the bad breath continue even after brushing?".to_string(),
                            "Do you have a constant bad taste in your mouth?".to_string(),
                        ],
                    ),
                ]),
                treatment: "Improved oral hygiene with regular brushing and flossing, \
                            professional dental cleaning to remove plaque and tartar, \
                            antiseptic mouthwash, and antibiotics in severe cases."
                    .into(),
            },
        ];

        Self::from_diseases(diseases).expect("builtin catalog is valid")
    }
}
