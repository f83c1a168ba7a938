//! Built-in medical jargon table
//!
//! Ordered: within equal-length matches the earlier entry wins.

/// `(medical term, patient-friendly phrase)` pairs
pub const BUILTIN_TERMS: &[(&str, &str)] = &[
    // Cardiovascular
    ("myocardial infarction", "heart attack"),
    ("coronary artery disease", "heart disease"),
    ("hypertension", "high blood pressure"),
    ("hypotension", "low blood pressure"),
    ("tachycardia", "fast heart rate"),
    ("bradycardia", "slow heart rate"),
    ("arrhythmia", "irregular heartbeat"),
    ("angina", "chest pain"),
    ("atherosclerosis", "hardening of arteries"),
    ("cardiomyopathy", "heart muscle disease"),
    // Respiratory
    ("pneumonia", "lung infection"),
    ("bronchitis", "inflammation of airways"),
    ("asthma", "breathing condition"),
    ("copd", "chronic lung disease"),
    ("dyspnea", "shortness of breath"),
    ("tachypnea", "rapid breathing"),
    ("hypoxia", "low oxygen levels"),
    ("pulmonary edema", "fluid in lungs"),
    // Gastrointestinal
    ("gastroenteritis", "stomach flu"),
    ("hepatitis", "liver inflammation"),
    ("cirrhosis", "liver scarring"),
    ("cholecystitis", "gallbladder inflammation"),
    ("pancreatitis", "pancreas inflammation"),
    ("gastritis", "stomach inflammation"),
    ("ulcer", "sore in stomach/intestine"),
    ("gerd", "acid reflux"),
    // Neurological
    ("cerebrovascular accident", "stroke"),
    ("transient ischemic attack", "mini-stroke"),
    ("migraine", "severe headache"),
    ("epilepsy", "seizure disorder"),
    ("dementia", "memory loss condition"),
    ("alzheimer's disease", "memory disease"),
    ("parkinson's disease", "movement disorder"),
    ("multiple sclerosis", "nervous system disease"),
    // Endocrine
    ("diabetes mellitus", "diabetes"),
    ("hyperglycemia", "high blood sugar"),
    ("hypoglycemia", "low blood sugar"),
    ("hyperthyroidism", "overactive thyroid"),
    ("hypothyroidism", "underactive thyroid"),
    ("diabetic ketoacidosis", "diabetes complication"),
    // Kidney
    ("acute kidney injury", "sudden kidney damage"),
    ("chronic kidney disease", "long-term kidney disease"),
    ("nephritis", "kidney inflammation"),
    ("renal failure", "kidney failure"),
    ("dialysis", "kidney treatment"),
    // Blood
    ("anemia", "low red blood cells"),
    ("leukemia", "blood cancer"),
    ("thrombosis", "blood clot"),
    ("hemorrhage", "bleeding"),
    ("coagulopathy", "bleeding disorder"),
    // General
    ("malignancy", "cancer"),
    ("benign", "non-cancerous"),
    ("acute", "sudden onset"),
    ("chronic", "long-term"),
    ("inflammation", "swelling"),
    ("infection", "germ invasion"),
    ("fracture", "broken bone"),
    ("contusion", "bruise"),
    ("laceration", "cut"),
    ("abrasion", "scrape"),
    ("edema", "swelling"),
    ("fever", "high temperature"),
    ("nausea", "feeling sick"),
    ("vomiting", "throwing up"),
    ("diarrhea", "loose stools"),
    ("constipation", "hard stools"),
    ("fatigue", "tiredness"),
    ("malaise", "general feeling of illness"),
];
