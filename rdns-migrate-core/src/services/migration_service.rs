//! 数据迁移服务（RDNS 0.4.x → 0.5.x）
//!
//! Reads frozen markers and tokens from the legacy store, fetches the A and
//! ACME TXT records each token owns from the legacy API, and posts everything
//! to the destination API. A failing record is logged, recorded in the
//! [`MigrationReport`] and skipped; only setup and enumeration failures abort.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::MigrationConfig;
use crate::error::{MigrateError, MigrateResult};
use crate::services::SourceReader;
use crate::traits::{ApiRequest, ApiTransport, SourceStore};
use crate::types::{Domain, Frozen, MigrationReport, RecordKind, Token};
use crate::utils::domain::{
    acme_challenge_fqdn, domain_from_token_path, frozen_label, rewrite_record_fqdn,
    rewrite_token_path, unwrap_txt_value,
};
use crate::utils::token::generate_token;

/// 迁移服务
pub struct MigrationService {
    reader: SourceReader,
    transport: Arc<dyn ApiTransport>,
    config: MigrationConfig,
    /// Held for the duration of every destination write
    write_section: Mutex<()>,
}

impl MigrationService {
    pub fn new(
        config: &MigrationConfig,
        store: Arc<dyn SourceStore>,
        transport: Arc<dyn ApiTransport>,
    ) -> Self {
        Self {
            reader: SourceReader::new(store, config.frozen_key()),
            transport,
            config: config.clone(),
            write_section: Mutex::new(()),
        }
    }

    /// Frozen markers first, then tokens and records
    pub async fn run(&self) -> MigrateResult<MigrationReport> {
        let mut report = self.migrate_frozen().await?;
        report.merge(self.migrate_records().await?);
        log::info!(
            "迁移完成：成功 {} 条，失败 {} 条",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Move every frozen-domain marker to the destination
    pub async fn migrate_frozen(&self) -> MigrateResult<MigrationReport> {
        let frozen = self.reader.get_frozen().await?;
        log::info!("migrating {} frozen domain(s)", frozen.len());

        let mut report = MigrationReport::new();
        for f in &frozen {
            let result = self.post_frozen_record(f).await;
            note(&mut report, RecordKind::Frozen, &f.path, result);
        }

        log::info!(
            "frozen migration finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Move every token, then the A and ACME TXT records the tokens own
    ///
    /// A failing step ends the work on that token: a rejected token is not
    /// queried, and a failed A query skips the TXT query. Query failures are
    /// reported under the record kind and fqdn they were fetching.
    pub async fn migrate_records(&self) -> MigrateResult<MigrationReport> {
        let tokens = self.reader.get_tokens().await?;
        log::info!("migrating {} token(s)", tokens.len());

        let mut report = MigrationReport::new();
        let mut a_records = Vec::new();
        let mut txt_records = Vec::new();

        for t in &tokens {
            let posted = self.post_token_record(t).await;
            if !note(&mut report, RecordKind::Token, &t.path, posted) {
                continue;
            }

            let fqdn = domain_from_token_path(&t.path).unwrap_or_else(|_| t.path.clone());
            match self.query_a_record(t).await {
                Ok(a) if !a.hosts.is_empty() => a_records.push(a),
                Ok(_) => {}
                Err(e) => {
                    note(&mut report, RecordKind::ARecord, &fqdn, Err(e));
                    continue;
                }
            }

            match self.query_txt_record(t).await {
                Ok(mut txt) if !txt.text.is_empty() => {
                    txt.text = unwrap_txt_value(&txt.text);
                    if !txt.text.is_empty() {
                        txt_records.push(txt);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    let txt_fqdn = acme_challenge_fqdn(&fqdn);
                    note(&mut report, RecordKind::TxtRecord, &txt_fqdn, Err(e));
                }
            }
        }

        log::info!(
            "collected {} A record(s) and {} TXT record(s)",
            a_records.len(),
            txt_records.len()
        );

        for (kind, records) in [
            (RecordKind::ARecord, a_records),
            (RecordKind::TxtRecord, txt_records),
        ] {
            for d in &records {
                let result = self.post_record(d).await;
                note(&mut report, kind, &d.fqdn, result);
            }
        }

        log::info!(
            "record migration finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// `POST /v1/migrate/frozen` with the marker reduced to its entry name
    pub async fn post_frozen_record(&self, f: &Frozen) -> MigrateResult<()> {
        let _guard = self.write_section.lock().await;
        let url = format!("{}/v1/migrate/frozen", self.config.dst_api_endpoint);

        let body = Frozen {
            path: frozen_label(&f.path)?,
            expiration: f.expiration,
        };

        self.transport
            .send(ApiRequest::post(url, serde_json::to_value(&body)?))
            .await?;
        log::debug!("migrated frozen domain {}", body.path);
        Ok(())
    }

    /// `POST /v1/migrate/token`, moving the path under the destination domain when it differs
    pub async fn post_token_record(&self, t: &Token) -> MigrateResult<()> {
        let _guard = self.write_section.lock().await;
        let url = format!("{}/v1/migrate/token", self.config.dst_api_endpoint);

        let mut body = t.clone();
        if self.config.rewrites_domain() {
            let fqdn = domain_from_token_path(&t.path)?;
            body.path = rewrite_token_path(&fqdn, &self.config.dst_domain)?;
        }

        self.transport
            .send(ApiRequest::post(url, serde_json::to_value(&body)?))
            .await?;
        log::debug!("migrated token {}", body.path);
        Ok(())
    }

    /// `GET /v1/domain/{fqdn}` on the legacy API
    pub async fn query_a_record(&self, t: &Token) -> MigrateResult<Domain> {
        let fqdn = domain_from_token_path(&t.path)?;
        let url = format!("{}/v1/domain/{fqdn}", self.config.src_api_endpoint);
        self.query_legacy(url, t, fqdn).await
    }

    /// `GET /v1/domain/_acme-challenge.{fqdn}/txt` on the legacy API
    ///
    /// Other TXT records are not migrated.
    pub async fn query_txt_record(&self, t: &Token) -> MigrateResult<Domain> {
        let fqdn = acme_challenge_fqdn(&domain_from_token_path(&t.path)?);
        let url = format!("{}/v1/domain/{fqdn}/txt", self.config.src_api_endpoint);
        self.query_legacy(url, t, fqdn).await
    }

    async fn query_legacy(&self, url: String, t: &Token, fqdn: String) -> MigrateResult<Domain> {
        let bearer = generate_token(&t.token)?;
        let response = self
            .transport
            .send(ApiRequest::get(url).with_bearer(bearer))
            .await?;

        let mut domain = response.data;
        if domain.fqdn.is_empty() {
            domain.fqdn = fqdn;
        }
        Ok(domain)
    }

    /// `POST /v1/migrate/record`, moving the fqdn under the destination domain when it differs
    pub async fn post_record(&self, d: &Domain) -> MigrateResult<()> {
        let _guard = self.write_section.lock().await;
        let url = format!("{}/v1/migrate/record", self.config.dst_api_endpoint);

        let mut body = d.clone();
        if self.config.rewrites_domain() {
            body.fqdn = rewrite_record_fqdn(&d.fqdn, d.is_txt(), &self.config.dst_domain)?;
        }

        self.transport
            .send(ApiRequest::post(url, serde_json::to_value(&body)?))
            .await?;
        log::debug!("migrated record {}", body.fqdn);
        Ok(())
    }
}

/// Records an outcome, logging failures; returns whether it succeeded.
///
/// This is the only place per-record failures are logged.
fn note(
    report: &mut MigrationReport,
    kind: RecordKind,
    record: &str,
    result: MigrateResult<()>,
) -> bool {
    match result {
        Ok(()) => {
            report.record_success(kind, record);
            true
        }
        Err(e) => {
            log_record_error(kind, record, &e);
            report.record_failure(kind, record, e);
            false
        }
    }
}

fn log_record_error(kind: RecordKind, record: &str, e: &MigrateError) {
    if e.is_expected() {
        log::warn!("[{kind}] {record}: {e}");
    } else {
        log::error!("[{kind}] {record}: {e}");
    }
}
