//! Bulk location import.
//!
//! Idempotent by name: an existing woreda (by name) or an existing kebele (by
//! name within its woreda) is skipped, never duplicated. One import is one
//! transaction.

use std::collections::HashMap;

use survey_core::enums::AuditAction;
use survey_core::import::LocationRow;
use survey_core::operator::OperatorContext;
use survey_core::responses::ImportSummary;

use crate::error::DatabaseError;
use crate::service::SurveyService;

struct KnownWoreda {
    id: String,
    kebeles: Vec<String>,
}

impl SurveyService {
    /// Apply location rows, creating only what is missing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a statement fails; nothing from the import is
    /// kept in that case.
    pub async fn import_locations(
        &self,
        ctx: &OperatorContext,
        rows: &[LocationRow],
    ) -> Result<ImportSummary, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = async {
            let mut summary = ImportSummary::default();
            let mut known: HashMap<String, KnownWoreda> = HashMap::new();

            for row in rows {
                if row.woreda.is_empty() {
                    summary.rows_skipped += 1;
                    continue;
                }

                if !known.contains_key(&row.woreda) {
                    let entry = match self.get_woreda_by_name(&row.woreda).await? {
                        Some(existing) => {
                            summary.woredas_skipped += 1;
                            let kebeles = self
                                .kebeles_of(&existing.id)
                                .await?
                                .into_iter()
                                .map(|k| k.name)
                                .collect();
                            KnownWoreda {
                                id: existing.id,
                                kebeles,
                            }
                        }
                        None => {
                            let created = self
                                .insert_woreda(&tx, ctx, &row.woreda, AuditAction::Imported)
                                .await?;
                            summary.woredas_created += 1;
                            KnownWoreda {
                                id: created.id,
                                kebeles: Vec::new(),
                            }
                        }
                    };
                    known.insert(row.woreda.clone(), entry);
                }

                let Some(kebele) = row.kebele.as_deref() else {
                    continue;
                };
                let Some(woreda) = known.get_mut(&row.woreda) else {
                    continue;
                };
                if woreda.kebeles.iter().any(|k| k == kebele) {
                    summary.kebeles_skipped += 1;
                } else {
                    self.insert_kebele(&tx, ctx, &woreda.id, kebele, AuditAction::Imported)
                        .await?;
                    woreda.kebeles.push(kebele.to_string());
                    summary.kebeles_created += 1;
                }
            }

            tracing::info!(
                woredas_created = summary.woredas_created,
                kebeles_created = summary.kebeles_created,
                rows_skipped = summary.rows_skipped,
                "location import applied"
            );
            Ok::<_, DatabaseError>(summary)
        }
        .await;
        self.db().finish(tx, result).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{test_ctx, test_service};

    use super::*;

    fn rows() -> Vec<LocationRow> {
        vec![
            LocationRow::new("Mecha", Some("Kebele 01")),
            LocationRow::new("Mecha", Some("Kebele 02")),
            LocationRow::new("Mecha", Some("Kebele 01")),
            LocationRow::new("Bahir Dar Zuria", None),
            LocationRow::new("  ", Some("Orphan")),
        ]
    }

    #[tokio::test]
    async fn import_creates_missing_locations() {
        let svc = test_service().await;
        let summary = svc.import_locations(&test_ctx(), &rows()).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                woredas_created: 2,
                woredas_skipped: 0,
                kebeles_created: 2,
                kebeles_skipped: 1,
                rows_skipped: 1,
            }
        );

        let tree = svc.location_tree().await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].woreda.name, "Mecha");
        assert_eq!(tree[0].kebele_names(), vec!["Kebele 01", "Kebele 02"]);
        assert!(tree[1].kebeles.is_empty());
    }

    #[tokio::test]
    async fn reimport_is_idempotent() {
        let svc = test_service().await;
        let ctx = test_ctx();
        svc.import_locations(&ctx, &rows()).await.unwrap();
        let second = svc.import_locations(&ctx, &rows()).await.unwrap();

        assert_eq!(second.woredas_created, 0);
        assert_eq!(second.kebeles_created, 0);
        assert_eq!(second.woredas_skipped, 2);
        assert_eq!(second.kebeles_skipped, 3);
        assert_eq!(svc.count_woredas().await.unwrap(), 2);
        assert_eq!(svc.count_kebeles().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn import_extends_existing_woreda() {
        let svc = test_service().await;
        let ctx = test_ctx();
        let woreda = svc.add_woreda(&ctx, "Mecha").await.unwrap();
        svc.add_kebele(&ctx, &woreda.id, "Kebele 01").await.unwrap();

        let summary = svc.import_locations(&ctx, &rows()).await.unwrap();
        assert_eq!(summary.woredas_skipped, 1);
        assert_eq!(summary.kebeles_created, 1);
        assert_eq!(
            svc.list_kebeles(&woreda.id).await.unwrap(),
            vec!["Kebele 01", "Kebele 02"]
        );
    }
}
