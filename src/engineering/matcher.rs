//! Range matching - which catalog dummies fall inside a product envelope

use crate::core::catalog::ReferenceCatalog;
use crate::engineering::envelope::Envelope;
use crate::entities::dummy::DummyProfile;

/// Dummies whose stature and mass bands both overlap the envelope, in catalog
/// declaration order. An empty result is not an error.
pub fn match_dummies<'a>(catalog: &'a ReferenceCatalog, envelope: &Envelope) -> Vec<&'a DummyProfile> {
    let matched: Vec<&DummyProfile> = catalog
        .dummies()
        .iter()
        .filter(|d| d.overlaps(&envelope.height_cm, &envelope.mass_kg))
        .collect();

    tracing::debug!(
        height = %envelope.height_cm,
        mass = %envelope.mass_kg,
        matched = matched.len(),
        "matched dummies"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::dummy::InstallDirection;

    fn codes(matched: &[&DummyProfile]) -> Vec<String> {
        matched.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_every_match_overlaps_both_axes() {
        let catalog = ReferenceCatalog::builtin();
        let envelopes = [
            (40.0, 150.0, 3.0, 36.0),
            (40.0, 50.0, 3.0, 4.0),
            (87.0, 110.0, 13.6, 18.2),
            (104.0, 106.0, 17.0, 19.0),
            (149.0, 160.0, 30.0, 40.0),
        ];

        for (min_h, max_h, min_w, max_w) in envelopes {
            let env = Envelope::new(min_h, max_h, min_w, max_w).unwrap();
            for dummy in match_dummies(catalog, &env) {
                assert!(dummy.height_cm.max >= min_h && dummy.height_cm.min <= max_h);
                assert!(dummy.mass_kg.max >= min_w && dummy.mass_kg.min <= max_w);
            }
        }
    }

    #[test]
    fn test_full_range_matches_whole_catalog_in_order() {
        let catalog = ReferenceCatalog::builtin();
        let env = Envelope::new(40.0, 150.0, 3.0, 36.0).unwrap();
        let matched = match_dummies(catalog, &env);

        let expected: Vec<String> = catalog.dummies().iter().map(|d| d.id.clone()).collect();
        assert_eq!(codes(&matched), expected);
    }

    #[test]
    fn test_q3s_band_selects_forward_q3s() {
        let catalog = ReferenceCatalog::builtin();
        let env = Envelope::new(105.0, 125.0, 19.0, 23.0).unwrap();
        let eu: Vec<&DummyProfile> = match_dummies(catalog, &env)
            .into_iter()
            .filter(|d| d.applies_to("UN R129"))
            .collect();

        assert_eq!(codes(&eu), vec!["DUMMY_Q3S"]);
        assert_eq!(eu[0].install_direction, InstallDirection::Forward);
    }

    #[test]
    fn test_shared_endpoints_include_neighbours() {
        let catalog = ReferenceCatalog::builtin();
        let env = Envelope::new(105.0, 125.0, 18.0, 24.0).unwrap();
        let matched = codes(&match_dummies(catalog, &env));

        assert!(matched.contains(&"DUMMY_Q3S".to_string()));
        assert!(matched.contains(&"DUMMY_Q3".to_string()));
        assert!(matched.contains(&"DUMMY_Q6".to_string()));
    }

    #[test]
    fn test_mass_outside_every_band_matches_nothing() {
        let catalog = ReferenceCatalog::builtin();
        let env = Envelope::new(40.0, 150.0, 50.0, 60.0).unwrap();
        assert!(match_dummies(catalog, &env).is_empty());
    }
}
