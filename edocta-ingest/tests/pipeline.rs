//! End-to-end pipeline checks across several banks.

use edocta_core::{CollectingReporter, NoopReporter, ParseEvent, TxnKind};
use edocta_ingest::{Document, IngestError, parse_statement, select_parser};

#[test]
fn afirme_end_to_end() {
    let text = "\
Descripcion,Fecha,Referencia,Cargos,Abonos,Saldo,Cuenta
PAGO TARJETA,01/03/24,REF123,0,500.00,1500.00,ACC001
";
    let stmt = parse_statement("afirme", &Document::Text(text), &NoopReporter).unwrap();
    assert_eq!(stmt.transactions.len(), 1);

    let txn = &stmt.transactions[0];
    assert_eq!(txn.date, "2024-03-01");
    assert_eq!(txn.kind, TxnKind::Credit);
    assert_eq!(txn.amount, 500.0);
    assert_eq!(txn.balance, 1500.0);
    assert_eq!(txn.reference, "REF123");
    assert_eq!(txn.account_number.as_deref(), Some("ACC001"));
    assert_eq!(txn.description, "PAGO TARJETA");
    assert_eq!(txn.bank.routing, "062");
}

#[test]
fn every_emitted_row_has_date_and_description() {
    let text = "\
BANREGIO ESTADO DE CUENTA
CUENTA: 058123456789

Fecha,Descripción,Referencia,Cargo,Abonos,Saldo,Clasificación
Saldo Inicial,,,,,\"4,000.00\",
01/03/2024,DEPOSITO SUCURSAL,7001,0,\"1,000.00\",\"5,000.00\",Depositos
,,,,,,
02/03/2024,COMPRA POS,7002,450.00,0,\"4,550.00\",Compras
Saldo Final,,,,,\"4,550.00\",
";
    let stmt = parse_statement("banregio", &Document::Text(text), &NoopReporter).unwrap();
    assert_eq!(stmt.transactions.len(), 2);
    for txn in &stmt.transactions {
        assert!(!txn.date.is_empty());
        assert!(!txn.description.is_empty());
        assert!(!txn.description.to_uppercase().contains("SALDO INICIAL"));
    }
}

#[test]
fn scotiabank_fixed_width_end_to_end() {
    // Current layout: tag(6) account(11) date(8) ref(7) amount(15) flag(1)
    // balance(15) filler(72) description(35) -> 170 chars.
    let line = format!(
        "CHQMXN{:<11}{:<8}{:<7}{:>15}A{:>15}{:<72}{:<35}",
        "00101234567", "31122024", "REF0042", "1,500.00", "25,000.00", "", "DEPOSITO SPEI CLIENTE"
    );
    assert!(line.len() >= 170);
    let text = format!("ENCABEZADO QUE NO ES MOVIMIENTO\n{line}\n");

    let stmt = parse_statement("scotiabank", &Document::Text(&text), &NoopReporter).unwrap();
    assert_eq!(stmt.transactions.len(), 1);
    assert_eq!(stmt.transactions[0].kind, TxnKind::Credit);
    assert!(stmt.transactions[0].amount > 0.0);
    assert_eq!(stmt.transactions[0].date, "2024-12-31");
}

#[test]
fn unsupported_bank_surfaces_error_and_no_records() {
    match select_parser("unknownbank") {
        Err(IngestError::UnsupportedBank(key)) => assert_eq!(key, "unknownbank"),
        Ok(_) => panic!("expected UnsupportedBank"),
    }
}

#[test]
fn missing_data_block_reports_diagnostic_instead_of_failing() {
    let reporter = CollectingReporter::new();
    let stmt = parse_statement(
        "banregio",
        &Document::Text("documento sin bloque de datos\n"),
        &reporter,
    )
    .unwrap();
    assert!(stmt.transactions.is_empty());
    assert_eq!(reporter.events(), vec![ParseEvent::HeaderNotFound { bank: "banregio" }]);
}

#[test]
fn parse_is_stateless_across_calls() {
    let text = "\
Fecha,Descripción,Referencia,Cargo,Abonos,Saldo,Clasificación
01/03/2024,DEPOSITO,1,0,100.00,100.00,Dep
";
    let parser = select_parser("banregio").unwrap();
    let first = parser.parse(&Document::Text(text), &NoopReporter);
    let second = parser.parse(&Document::Text(text), &NoopReporter);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
fn spei_enrichment_flows_to_the_record() {
    let text = "\
Fecha De Operación,Descripción,Referencia,Retiros,Depositos,Saldo
05/03/2024,SPEI RECIBIDO DE: ACME SA DE CV CVE RASTREO: BNTE2024030500011 HORA LIQ: 13:45:02 CONCEPTO: PAGO FACTURA 881 RFC CEJ123456AB7,0003,0,\"12,000.00\",\"18,650.00\"
";
    let stmt = parse_statement("banorte", &Document::Text(text), &NoopReporter).unwrap();
    let txn = &stmt.transactions[0];
    assert_eq!(txn.beneficiary.as_deref(), Some("ACME SA DE CV"));
    assert_eq!(txn.tracking_key.as_deref(), Some("BNTE2024030500011"));
    assert_eq!(txn.rfc.as_deref(), Some("CEJ123456AB7"));
    assert_eq!(txn.concept.as_deref(), Some("PAGO FACTURA 881"));
    assert_eq!(txn.time.as_deref(), Some("13:45:02"));
    assert_eq!(txn.description, "PAGO FACTURA 881 ACME SA DE CV");
    assert!(txn.raw.contains("SPEI RECIBIDO"));
}
