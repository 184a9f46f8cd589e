//! Match resolution and candidate delivery.
//!
//! `resolve` computes the eligible candidate set for a requester and records
//! newly discovered pairs in the match ledger; `next` is the cursor claiming
//! the oldest undelivered ledger row. The ledger is permanent memory: a pair
//! that was ever recorded is never suggested again.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    domain::{ExclusionKind, Gender, Interest, Photo, Profile, UserId},
    store::{exclusions, interests, ledger, profiles, Store},
    Error, Result,
};

const MIN_AGE: u16 = 18;
const MAX_AGE: u16 = 80;
const DEFAULT_AGE_MAX: u16 = 35;
const AGE_SPREAD: u16 = 5;

/// Search window derived from a requester's profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub gender: Gender,
    pub age_min: u16,
    pub age_max: u16,
}

impl Preferences {
    /// Preferred gender is the complement of the requester's; an unset
    /// gender is `AmbiguousPreference`, never a guess. Age window is
    /// [max(18, age-5), min(80, age+5)], or [18, 35] when age is unknown.
    pub fn derive(profile: &Profile) -> Result<Preferences> {
        let own = profile
            .gender
            .ok_or(Error::AmbiguousPreference(profile.id.0))?;
        let (age_min, age_max) = match profile.age {
            Some(age) => (
                age.saturating_sub(AGE_SPREAD).max(MIN_AGE),
                age.saturating_add(AGE_SPREAD).min(MAX_AGE),
            ),
            None => (MIN_AGE, DEFAULT_AGE_MAX),
        };
        Ok(Preferences {
            gender: own.complement(),
            age_min,
            age_max,
        })
    }
}

/// Why a resolution produced no eligible candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nobody matched gender/age/city.
    Demographics,
    /// The demographic pool was non-empty but nobody shared an interest.
    Interests,
}

/// A candidate ready to show: profile plus its most-liked photos.
#[derive(Clone, Debug)]
pub struct Delivery {
    pub profile: Profile,
    pub photos: Vec<Photo>,
}

#[derive(Clone, Debug)]
pub enum NextOutcome {
    Delivered(Delivery),
    /// No undelivered ledger rows remain; a fresh `resolve` is safe.
    Exhausted,
}

#[derive(Clone, Debug)]
pub enum ResolveOutcome {
    /// Eligible candidates were recorded; carries the cursor's first answer.
    Resolved(NextOutcome),
    NoneFound(EmptyReason),
}

pub struct Matchmaker {
    store: Arc<Store>,
    photos_per_card: usize,
}

impl Matchmaker {
    pub fn new(store: Arc<Store>, photos_per_card: usize) -> Self {
        Self {
            store,
            photos_per_card,
        }
    }

    /// Compute eligible candidates for `requester` and record the new pairs.
    ///
    /// Idempotent: pairs already in the ledger are skipped, so re-running
    /// never duplicates rows or re-suggests a historical pair.
    pub async fn resolve(&self, requester: UserId) -> Result<ResolveOutcome> {
        let mut conn = self.store.conn().await;
        let tx = conn.transaction()?;

        let profile =
            profiles::get(&tx, requester)?.ok_or(Error::ProfileNotFound(requester.0))?;
        let prefs = Preferences::derive(&profile)?;

        // City equality is exact; an unset city matches nobody.
        let Some(city) = profile.city.clone() else {
            return Ok(ResolveOutcome::NoneFound(EmptyReason::Demographics));
        };

        let pool = profiles::query_candidates(
            &tx,
            requester,
            prefs.gender,
            prefs.age_min,
            prefs.age_max,
            &city,
        )?;
        if pool.is_empty() {
            return Ok(ResolveOutcome::NoneFound(EmptyReason::Demographics));
        }

        // Interest narrowing only applies when the requester has interests.
        let own_interests = interests::ids_for_user(&tx, requester)?;
        let mut eligible = Vec::with_capacity(pool.len());
        if own_interests.is_empty() {
            eligible = pool;
        } else {
            for candidate in pool {
                let theirs = interests::ids_for_user(&tx, candidate.id)?;
                if !own_interests.is_disjoint(&theirs) {
                    eligible.push(candidate);
                }
            }
            if eligible.is_empty() {
                return Ok(ResolveOutcome::NoneFound(EmptyReason::Interests));
            }
        }

        let blocked = exclusions::target_set(&tx, ExclusionKind::Blacklist, requester)?;
        let now = Utc::now().timestamp_millis();
        let mut inserted = 0usize;
        for candidate in &eligible {
            if blocked.contains(&candidate.id.0) {
                continue;
            }
            if ledger::exists(&tx, requester, candidate.id)? {
                continue;
            }
            ledger::insert(&tx, requester, candidate.id, now)?;
            inserted += 1;
        }

        let first = self.claim_next(&tx, requester)?;
        tx.commit()?;

        tracing::info!(
            requester = requester.0,
            eligible = eligible.len(),
            inserted,
            "resolution complete"
        );
        Ok(ResolveOutcome::Resolved(first))
    }

    /// Claim and return the next undelivered candidate for `requester`.
    pub async fn next(&self, requester: UserId) -> Result<NextOutcome> {
        let mut conn = self.store.conn().await;
        let tx = conn.transaction()?;
        let outcome = self.claim_next(&tx, requester)?;
        tx.commit()?;
        Ok(outcome)
    }

    /// Cursor core: oldest unshown row, claimed with a conditional update.
    /// Zero rows affected means the row was claimed concurrently; loop on.
    fn claim_next(&self, conn: &rusqlite::Connection, requester: UserId) -> Result<NextOutcome> {
        loop {
            let Some(record) = ledger::oldest_unshown(conn, requester)? else {
                return Ok(NextOutcome::Exhausted);
            };
            if !ledger::mark_shown(conn, record.id)? {
                continue;
            }
            let Some(profile) = profiles::get(conn, record.candidate)? else {
                // Ledger row referencing a vanished profile: already marked
                // shown, move on.
                continue;
            };
            let photos = crate::store::photos::top_for_user(
                conn,
                record.candidate,
                self.photos_per_card,
            )?;
            tracing::debug!(
                requester = requester.0,
                candidate = record.candidate.0,
                "candidate delivered"
            );
            return Ok(NextOutcome::Delivered(Delivery { profile, photos }));
        }
    }

    pub async fn add_exclusion(
        &self,
        kind: ExclusionKind,
        owner: UserId,
        target: UserId,
    ) -> Result<()> {
        let mut conn = self.store.conn().await;
        let tx = conn.transaction()?;
        let added = exclusions::add(&tx, kind, owner, target)?;
        tx.commit()?;
        if !added {
            return Err(Error::AlreadyExcluded {
                kind,
                owner: owner.0,
                target: target.0,
            });
        }
        Ok(())
    }

    /// Profiles in the owner's exclusion set, in insertion order. Empty is a
    /// valid result, distinct from a store failure.
    pub async fn list_exclusion(
        &self,
        kind: ExclusionKind,
        owner: UserId,
    ) -> Result<Vec<Profile>> {
        let conn = self.store.conn().await;
        let targets = exclusions::list_targets(&conn, kind, owner)?;
        let mut out = Vec::with_capacity(targets.len());
        for target in targets {
            if let Some(profile) = profiles::get(&conn, target)? {
                out.push(profile);
            }
        }
        Ok(out)
    }

    /// Attach an interest by name, creating the interest row if absent.
    /// Names are normalized to lowercase before lookup.
    pub async fn attach_interest(&self, user: UserId, name: &str) -> Result<Interest> {
        let name = name.trim().to_lowercase();
        let mut conn = self.store.conn().await;
        let tx = conn.transaction()?;
        if profiles::get(&tx, user)?.is_none() {
            return Err(Error::ProfileNotFound(user.0));
        }
        let id = interests::ensure(&tx, &name)?;
        let attached = interests::attach(&tx, user, id)?;
        tx.commit()?;
        if !attached {
            return Err(Error::DuplicateInterest {
                user: user.0,
                interest: name,
            });
        }
        Ok(Interest { id, name })
    }

    pub async fn interests_of(&self, user: UserId) -> Result<Vec<String>> {
        let conn = self.store.conn().await;
        interests::names_for_user(&conn, user)
    }

    /// Create the profile on first contact; existing profiles are untouched.
    /// Returns true if a new profile was created.
    pub async fn ensure_profile(&self, profile: &Profile) -> Result<bool> {
        let conn = self.store.conn().await;
        profiles::create(&conn, profile)
    }

    pub async fn profile(&self, user: UserId) -> Result<Option<Profile>> {
        let conn = self.store.conn().await;
        profiles::get(&conn, user)
    }

    pub async fn set_age(&self, user: UserId, age: u16) -> Result<()> {
        let conn = self.store.conn().await;
        if !profiles::set_age(&conn, user, age)? {
            return Err(Error::ProfileNotFound(user.0));
        }
        Ok(())
    }

    pub async fn set_gender(&self, user: UserId, gender: Gender) -> Result<()> {
        let conn = self.store.conn().await;
        if !profiles::set_gender(&conn, user, gender)? {
            return Err(Error::ProfileNotFound(user.0));
        }
        Ok(())
    }

    pub async fn set_city(&self, user: UserId, city: &str) -> Result<()> {
        let conn = self.store.conn().await;
        if !profiles::set_city(&conn, user, city)? {
            return Err(Error::ProfileNotFound(user.0));
        }
        Ok(())
    }
}
