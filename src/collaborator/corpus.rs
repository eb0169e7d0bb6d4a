use crate::models::Paper;

/// The fixed literature corpus every cycle synthesizes from.
pub fn papers() -> Vec<Paper> {
    vec![
        Paper {
            id: "arxiv:2305.1234".to_string(),
            title: "Deep Reinforcement Learning for Autonomous Vertical Landing of Rocket Boosters"
                .to_string(),
            authors: vec!["John Smith".to_string(), "Elena Vance".to_string()],
            summary: "A DRL approach to vertical landing that optimizes fuel consumption and \
                      landing accuracy under varying wind conditions."
                .to_string(),
            published: "2023-05-12".to_string(),
            url: "https://arxiv.org/abs/2305.1234".to_string(),
        },
        Paper {
            id: "arxiv:2309.5678".to_string(),
            title: "Advanced Thermal Protection Systems for Interplanetary Re-entry Vehicles"
                .to_string(),
            authors: vec!["Marcus Aurelius".to_string(), "Sarah Connor".to_string()],
            summary: "Ablative material performance at heat fluxes above 15 MW/m2 measured in \
                      plasma wind tunnel testing."
                .to_string(),
            published: "2023-09-22".to_string(),
            url: "https://arxiv.org/abs/2309.5678".to_string(),
        },
        Paper {
            id: "arxiv:2401.9012".to_string(),
            title: "Methane-Oxygen Liquid Rocket Engine Performance at High Sea-Level Altitudes"
                .to_string(),
            authors: vec!["Rocket Lab Team".to_string()],
            summary: "Experimental results from a 50kN methalox engine showing pressure \
                      stability and thrust-to-weight optimization paths."
                .to_string(),
            published: "2024-01-05".to_string(),
            url: "https://arxiv.org/abs/2401.9012".to_string(),
        },
    ]
}
