use shoji_ipc::{ButtonRemap, Rule};

/// Accumulated outcome of every rule matching a client
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RuleOutcome {
    /// OR of the tags of every match, unmasked
    pub tags: u32,
    pub is_floating: Option<bool>,
    pub no_focus: Option<bool>,
    pub no_border: Option<bool>,
    pub monitor: Option<usize>,
    pub opacity: Option<f32>,
    pub mouse_remap: Option<Vec<ButtonRemap>>,
}

/// Ordered client placement rules.
/// Matching is top to bottom and every match contributes.
#[derive(Debug, Default)]
pub struct RulesEngine {
    rules: Vec<Rule>,
}

impl RulesEngine {
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        for rule in &rules {
            tracing::debug!(
                "Rule: class={:?} instance={:?} title={:?}",
                rule.class,
                rule.instance,
                rule.title
            );
        }
        Self { rules }
    }

    /// Later matches override earlier ones for scalar fields; tags accumulate.
    pub fn apply(&self, class: &str, instance: &str, title: &str) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        for rule in self
            .rules
            .iter()
            .filter(|r| rule_matches(r, class, instance, title))
        {
            tracing::trace!("Rule matched {}/{}/{}: {:?}", class, instance, title, rule);
            outcome.tags |= rule.tags;
            if rule.is_floating.is_some() {
                outcome.is_floating = rule.is_floating;
            }
            if rule.no_focus.is_some() {
                outcome.no_focus = rule.no_focus;
            }
            if rule.no_border.is_some() {
                outcome.no_border = rule.no_border;
            }
            if rule.monitor.is_some() {
                outcome.monitor = rule.monitor;
            }
            if let Some(opacity) = rule.opacity {
                outcome.opacity = Some(opacity.clamp(0.0, 1.0));
            }
            if !rule.mouse_remap.is_empty() {
                outcome.mouse_remap = Some(rule.mouse_remap.clone());
            }
        }

        outcome
    }
}

/// Each present pattern must occur as a substring; absent ones match anything.
fn rule_matches(rule: &Rule, class: &str, instance: &str, title: &str) -> bool {
    let field = |pattern: &Option<String>, value: &str| {
        pattern.as_deref().map_or(true, |p| value.contains(p))
    };
    field(&rule.class, class) && field(&rule.instance, instance) && field(&rule.title, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_rule(class: &str) -> Rule {
        Rule {
            class: Some(class.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_gimp_rule() {
        let engine = RulesEngine::with_rules(vec![
            Rule {
                is_floating: Some(true),
                monitor: Some(1),
                tags: 1 << 4,
                ..class_rule("Gimp")
            },
            Rule {
                tags: 1 << 8,
                ..class_rule("Firefox")
            },
        ]);

        let outcome = engine.apply("Gimp", "gimp", "GNU Image Manipulation Program");
        assert_eq!(outcome.tags, 1 << 4);
        assert_eq!(outcome.is_floating, Some(true));
        assert_eq!(outcome.monitor, Some(1));
        assert_eq!(outcome.no_focus, None);
    }

    #[test]
    fn test_no_match_is_default() {
        let engine = RulesEngine::with_rules(vec![class_rule("Gimp")]);
        assert_eq!(engine.apply("XTerm", "xterm", "bash"), RuleOutcome::default());
    }

    #[test]
    fn test_substring_match() {
        let engine = RulesEngine::with_rules(vec![Rule {
            title: Some("Preferences".to_string()),
            is_floating: Some(true),
            ..Default::default()
        }]);
        assert_eq!(
            engine.apply("Firefox", "Navigator", "Firefox Preferences").is_floating,
            Some(true)
        );
        assert_eq!(engine.apply("Firefox", "Navigator", "Inbox").is_floating, None);
    }

    #[test]
    fn test_accumulates_tags_and_overrides_scalars() {
        let engine = RulesEngine::with_rules(vec![
            Rule {
                tags: 0b001,
                is_floating: Some(true),
                opacity: Some(0.8),
                ..class_rule("Term")
            },
            Rule {
                instance: Some("scratch".to_string()),
                tags: 0b100,
                is_floating: Some(false),
                no_border: Some(true),
                ..Default::default()
            },
        ]);

        let outcome = engine.apply("Term", "scratchpad", "");
        assert_eq!(outcome.tags, 0b101);
        assert_eq!(outcome.is_floating, Some(false));
        assert_eq!(outcome.no_border, Some(true));
        // Untouched by the later rule
        assert_eq!(outcome.opacity, Some(0.8));
    }

    #[test]
    fn test_opacity_clamped_and_remap_kept() {
        let engine = RulesEngine::with_rules(vec![Rule {
            opacity: Some(1.5),
            mouse_remap: vec![ButtonRemap { from: 1, to: 3 }],
            ..class_rule("Game")
        }]);
        let outcome = engine.apply("Game", "", "");
        assert_eq!(outcome.opacity, Some(1.0));
        assert_eq!(outcome.mouse_remap, Some(vec![ButtonRemap { from: 1, to: 3 }]));
    }
}
