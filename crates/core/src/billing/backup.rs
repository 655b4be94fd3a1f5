//! Backup base fees and overage billing

use mspdash_domain::constants::{BYTES_PER_TB, DEFAULT_BACKUP_INCLUDED_TB};
use mspdash_domain::{Asset, AssetBillingType, BackupSummary, EffectiveRates, RateField};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackupCharges {
    pub summary: BackupSummary,
    pub included_tb: f64,
    pub overage_tb: f64,
    pub base_workstation: f64,
    pub base_server: f64,
    pub overage_charge: f64,
    pub backup_charge: f64,
}

/// Computes backup charges over synced assets.
///
/// An asset counts as backed up when it reports a nonzero byte total. Counts
/// use the asset's stored billing type, not any override: `Workstation` is a
/// workstation, `Server` and `VM` are servers.
pub fn bill_backups(assets: &[Asset], rates: &EffectiveRates) -> BackupCharges {
    let mut summary = BackupSummary::default();

    for asset in assets.iter().filter(|asset| asset.backup_bytes() != 0) {
        summary.total_backup_bytes += asset.backup_bytes();
        match asset.billing_type.as_deref().and_then(AssetBillingType::parse) {
            Some(AssetBillingType::Workstation) => summary.backed_up_workstations += 1,
            Some(AssetBillingType::Server | AssetBillingType::Vm) => {
                summary.backed_up_servers += 1;
            }
            _ => {}
        }
    }
    summary.total_backup_tb = summary.total_backup_bytes as f64 / BYTES_PER_TB;

    let per_device_tb = match rates.rate(RateField::BackupIncludedTb) {
        tb if tb == 0.0 => DEFAULT_BACKUP_INCLUDED_TB,
        tb => tb,
    };
    let devices = f64::from(summary.backed_up_workstations + summary.backed_up_servers);
    let included_tb = devices * per_device_tb;
    let overage_tb = (summary.total_backup_tb - included_tb).max(0.0);

    let base_workstation = f64::from(summary.backed_up_workstations)
        * rates.rate(RateField::BackupBaseFeeWorkstation);
    let base_server =
        f64::from(summary.backed_up_servers) * rates.rate(RateField::BackupBaseFeeServer);
    let overage_charge = overage_tb * rates.rate(RateField::BackupPerTbFee);

    BackupCharges {
        summary,
        included_tb,
        overage_tb,
        base_workstation,
        base_server,
        overage_charge,
        backup_charge: base_workstation + base_server + overage_charge,
    }
}

#[cfg(test)]
mod tests {
    use mspdash_domain::BillingPlan;

    use super::*;
    use crate::billing::rates::resolve_rates;

    const TB: i64 = 1_099_511_627_776;

    fn backup_asset(billing_type: &str, bytes: i64) -> Asset {
        Asset {
            hostname: format!("{billing_type}-{bytes}"),
            billing_type: Some(billing_type.into()),
            backup_data_bytes: Some(bytes),
            ..Asset::default()
        }
    }

    fn rates(included_tb: Option<f64>) -> EffectiveRates {
        let mut plan = BillingPlan::default()
            .with_rate(RateField::BackupBaseFeeWorkstation, 25.0)
            .with_rate(RateField::BackupBaseFeeServer, 50.0)
            .with_rate(RateField::BackupPerTbFee, 15.0);
        if let Some(tb) = included_tb {
            plan = plan.with_rate(RateField::BackupIncludedTb, tb);
        }
        resolve_rates(&plan, None)
    }

    #[test]
    fn counts_devices_by_stored_type_with_nonzero_bytes() {
        let assets = vec![
            backup_asset("Workstation", TB),
            backup_asset("Server", TB),
            backup_asset("VM", 2 * TB),
            backup_asset("Workstation", 0),
            backup_asset("Switch", TB),
        ];
        let charges = bill_backups(&assets, &rates(Some(1.0)));

        assert_eq!(charges.summary.backed_up_workstations, 1);
        assert_eq!(charges.summary.backed_up_servers, 2);
        assert_eq!(charges.summary.total_backup_bytes, 5 * TB);
        assert_eq!(charges.summary.total_backup_tb, 5.0);
        assert_eq!(charges.included_tb, 3.0);
        assert_eq!(charges.overage_tb, 2.0);
        assert_eq!(charges.base_workstation, 25.0);
        assert_eq!(charges.base_server, 100.0);
        assert_eq!(charges.overage_charge, 30.0);
        assert_eq!(charges.backup_charge, 155.0);
    }

    #[test]
    fn overage_never_goes_negative() {
        let assets = vec![backup_asset("Server", TB / 4)];
        let charges = bill_backups(&assets, &rates(Some(5.0)));
        assert_eq!(charges.overage_tb, 0.0);
        assert_eq!(charges.overage_charge, 0.0);
        assert_eq!(charges.backup_charge, 50.0);
    }

    #[test]
    fn unset_or_zero_included_tb_means_one_per_device() {
        let assets = vec![backup_asset("Workstation", 3 * TB)];
        assert_eq!(bill_backups(&assets, &rates(None)).included_tb, 1.0);
        assert_eq!(bill_backups(&assets, &rates(Some(0.0))).overage_tb, 2.0);
    }

    #[test]
    fn no_backups_no_charge() {
        let charges = bill_backups(&[], &rates(Some(1.0)));
        assert_eq!(charges, BackupCharges::default());
    }
}
