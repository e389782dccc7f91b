//! Loot offers and their classification.
//!
//! The host delivers loot as an open record: a free-form type tag, up to
//! two integer value slots, and a display label. The engine core only ever
//! consumes the closed [`LootKind`] sum type; [`LootOffer::classify`] is
//! the tolerant translation layer in between.

use serde::{Deserialize, Serialize};

use super::fighter::{Fighter, CHARGES_MAX, CHARGES_MIN};

/// Per-move charge grant carried by `GrantCharges` offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeGrant {
    #[serde(default)]
    pub r: i32,
    #[serde(default)]
    pub p: i32,
    #[serde(default)]
    pub s: i32,
}

/// A loot offer as it arrives from the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootOffer {
    /// Type discriminator; canonical tags are matched first, anything else
    /// falls through to keyword matching on tag and label.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub value2: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<ChargeGrant>,
}

impl LootOffer {
    pub fn tagged(kind: &str, value: i32, value2: i32) -> Self {
        Self {
            kind: kind.to_string(),
            value,
            value2,
            label: None,
            charges: None,
        }
    }

    pub fn labelled(label: &str, value: i32, value2: i32) -> Self {
        Self {
            kind: String::new(),
            value,
            value2,
            label: Some(label.to_string()),
            charges: None,
        }
    }

    /// Resolve the offer into the closed sum type the engine consumes.
    pub fn classify(&self) -> LootKind {
        if let Some(kind) = self.classify_canonical() {
            return kind;
        }
        self.classify_keywords()
    }

    fn classify_canonical(&self) -> Option<LootKind> {
        let tag = self.kind.trim();
        let kind = if tag.eq_ignore_ascii_case("Heal") {
            LootKind::Heal(self.value)
        } else if tag.eq_ignore_ascii_case("AddMaxHealth") {
            LootKind::AddMaxHealth(self.value)
        } else if tag.eq_ignore_ascii_case("AddMaxArmor") {
            LootKind::AddMaxArmor(self.value)
        } else if tag.eq_ignore_ascii_case("UpgradeRock") {
            LootKind::UpgradeRock(self.value, self.value2)
        } else if tag.eq_ignore_ascii_case("UpgradePaper") {
            LootKind::UpgradePaper(self.value, self.value2)
        } else if tag.eq_ignore_ascii_case("UpgradeScissor") {
            LootKind::UpgradeScissor(self.value, self.value2)
        } else if tag.eq_ignore_ascii_case("GrantCharges") {
            // Per-move grant when the host sends one; a bare value slot
            // grants that many charges to all three moves.
            let grant = self.charges.unwrap_or(ChargeGrant {
                r: self.value,
                p: self.value,
                s: self.value,
            });
            LootKind::GrantCharges {
                rock: grant.r,
                paper: grant.p,
                scissor: grant.s,
            }
        } else {
            return None;
        };
        Some(kind)
    }

    /// Keyword fallback over tag and label. Order matters: the max-HP and
    /// armor keywords are checked before "heal" so that "MaxHealth Potion"
    /// is not mistaken for a plain heal.
    fn classify_keywords(&self) -> LootKind {
        let mut text = self.kind.to_ascii_lowercase();
        if let Some(label) = &self.label {
            text.push(' ');
            text.push_str(&label.to_ascii_lowercase());
        }
        let has = |needle: &str| text.contains(needle);

        if has("maxhealth") || has("hp") || has("vitality") {
            LootKind::AddMaxHealth(self.value)
        } else if has("maxarmor") || has("armor") {
            LootKind::AddMaxArmor(self.value)
        } else if has("heal") || has("potion") {
            LootKind::Heal(self.value)
        } else if has("rock") || has("sword") {
            LootKind::UpgradeRock(self.value, self.value2)
        } else if has("paper") || has("shield") {
            LootKind::UpgradePaper(self.value, self.value2)
        } else if has("scissor") || has("spell") || has("magic") {
            LootKind::UpgradeScissor(self.value, self.value2)
        } else {
            LootKind::Unknown
        }
    }
}

/// The closed set of boons the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Heal(i32),
    AddMaxHealth(i32),
    AddMaxArmor(i32),
    UpgradeRock(i32, i32),
    UpgradePaper(i32, i32),
    UpgradeScissor(i32, i32),
    GrantCharges { rock: i32, paper: i32, scissor: i32 },
    Unknown,
}

impl LootKind {
    /// Apply the boon to a fighter, honoring every cap: heals stop at max
    /// health, armor gains stop at max armor, charges clamp to [-1, 3].
    pub fn apply_to(&self, fighter: &mut Fighter) {
        match *self {
            LootKind::Heal(v) => fighter.health.gain(v),
            LootKind::AddMaxHealth(v) => {
                fighter.health.raise_max(v);
                fighter.health.gain(v);
            }
            LootKind::AddMaxArmor(v) => {
                fighter.armor.raise_max(v);
                fighter.armor.gain(v);
            }
            LootKind::UpgradeRock(atk, def) => {
                fighter.rock.atk += atk;
                fighter.rock.def += def;
            }
            LootKind::UpgradePaper(atk, def) => {
                fighter.paper.atk += atk;
                fighter.paper.def += def;
            }
            LootKind::UpgradeScissor(atk, def) => {
                fighter.scissor.atk += atk;
                fighter.scissor.def += def;
            }
            LootKind::GrantCharges {
                rock,
                paper,
                scissor,
            } => {
                for (stat, grant) in [
                    (&mut fighter.rock, rock),
                    (&mut fighter.paper, paper),
                    (&mut fighter.scissor, scissor),
                ] {
                    let raised = stat.charges as i32 + grant;
                    stat.charges = raised.clamp(CHARGES_MIN as i32, CHARGES_MAX as i32) as i8;
                }
            }
            LootKind::Unknown => {}
        }
    }

    pub fn is_heal(&self) -> bool {
        matches!(self, LootKind::Heal(_))
    }

    /// Short name for logs and rankings.
    pub fn name(&self) -> &'static str {
        match self {
            LootKind::Heal(_) => "Heal",
            LootKind::AddMaxHealth(_) => "AddMaxHealth",
            LootKind::AddMaxArmor(_) => "AddMaxArmor",
            LootKind::UpgradeRock(..) => "UpgradeRock",
            LootKind::UpgradePaper(..) => "UpgradePaper",
            LootKind::UpgradeScissor(..) => "UpgradeScissor",
            LootKind::GrantCharges { .. } => "GrantCharges",
            LootKind::Unknown => "Unknown",
        }
    }
}
