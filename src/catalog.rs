//! Closed SAT catalogs used in CFDI payloads.
//!
//! Every variant serializes to its official catalog code, and parsing a code
//! that is not in the catalog fails with [`ClientError::InvalidCatalogCode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ClientError;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident: $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every entry of the catalog, in catalog order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Official catalog code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ClientError;

            fn from_str(code: &str) -> Result<Self, Self::Err> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(ClientError::InvalidCatalogCode {
                        catalog: $label,
                        code: other.to_owned(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = String::deserialize(deserializer)?;
                code.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

catalog! {
    /// SAT payment form (`c_FormaPago`).
    PaymentForm: "payment form" {
        Efectivo => "01",
        ChequeNominativo => "02",
        TransferenciaElectronicaDeFondos => "03",
        TarjetaDeCredito => "04",
        MonederoElectronico => "05",
        DineroElectronico => "06",
        ValesDeDespensa => "08",
        DacionEnPago => "12",
        PagoPorSubrogacion => "13",
        PagoPorConsignacion => "14",
        Condonacion => "15",
        Compensacion => "17",
        Novacion => "23",
        Confusion => "24",
        RemisionDeDeuda => "25",
        PrescripcionOCaducidad => "26",
        ASatisfaccionDelAcreedor => "27",
        TarjetaDeDebito => "28",
        TarjetaDeServicios => "29",
        AplicacionDeAnticipos => "30",
        IntermediarioPagos => "31",
        PorDefinir => "99",
    }
}

catalog! {
    /// SAT payment method (`c_MetodoPago`).
    PaymentMethod: "payment method" {
        /// Single payment.
        UnaSolaExhibicion => "PUE",
        /// Installments or deferred payment.
        ParcialidadesDiferido => "PPD",
    }
}

catalog! {
    /// SAT CFDI usage (`c_UsoCFDI`).
    InvoiceUse: "invoice use" {
        AdquisicionMercancias => "G01",
        DevolucionesDescuentosBonificaciones => "G02",
        GastosEnGeneral => "G03",
        Construcciones => "I01",
        MobiliarioYEquipoDeOficina => "I02",
        EquipoDeTransporte => "I03",
        EquipoDeComputo => "I04",
        DadosTroquelesHerramental => "I05",
        ComunicacionesTelefonicas => "I06",
        ComunicacionesSatelitales => "I07",
        OtraMaquinaria => "I08",
        HonorariosMedicos => "D01",
        GastosMedicosPorIncapacidad => "D02",
        GastosFunerales => "D03",
        Donativos => "D04",
        InteresesPorCreditosHipotecarios => "D05",
        AportacionesVoluntariasSar => "D06",
        PrimaSegurosGastosMedicos => "D07",
        GastosTransportacionEscolar => "D08",
        CuentasAhorroPensiones => "D09",
        ServiciosEducativos => "D10",
        SinEfectosFiscales => "S01",
        Pagos => "CP01",
        Nomina => "CN01",
    }
}

catalog! {
    /// Reason sent when cancelling an invoice.
    CancellationReason: "cancellation reason" {
        /// Issued with errors, a substitute invoice is related.
        ErrorsWithRelation => "01",
        /// Issued with errors, no substitute invoice.
        ErrorsWithoutRelation => "02",
        OperationNotCarriedOut => "03",
        NominativeTransaction => "04",
    }
}

catalog! {
    /// Period covered by a global invoice built from receipts.
    ReceiptPeriodicity: "receipt periodicity" {
        Day => "day",
        Week => "week",
        Fortnight => "fortnight",
        Month => "month",
        TwoMonths => "two_months",
    }
}

catalog! {
    /// SAT tax regime (`c_RegimenFiscal`).
    TaxSystem: "tax system" {
        GeneralDeLeyPersonasMorales => "601",
        PersonasMoralesConFinesNoLucrativos => "603",
        SueldosYSalarios => "605",
        Arrendamiento => "606",
        EnajenacionOAdquisicionDeBienes => "607",
        DemasIngresos => "608",
        ResidentesEnElExtranjero => "610",
        IngresosPorDividendos => "611",
        PersonasFisicasConActividadesEmpresariales => "612",
        IngresosPorIntereses => "614",
        ObtencionDePremios => "615",
        SinObligacionesFiscales => "616",
        SociedadesCooperativasDeProduccion => "620",
        IncorporacionFiscal => "621",
        ActividadesAgricolasGanaderasSilvicolasYPesqueras => "622",
        OpcionalParaGruposDeSociedades => "623",
        Coordinados => "624",
        PlataformasTecnologicas => "625",
        RegimenSimplificadoDeConfianza => "626",
    }
}

catalog! {
    /// Relation between a new CFDI and previously issued ones (`c_TipoRelacion`).
    InvoiceRelation: "invoice relation" {
        NotaDeCredito => "01",
        NotaDeDebito => "02",
        Devolucion => "03",
        Sustitucion => "04",
        Traslados => "05",
        FacturaPorTraslados => "06",
        CfdiPorAnticipo => "07",
        FacturaPorParcialidades => "08",
        FacturaPorDiferidos => "09",
    }
}

catalog! {
    /// CFDI voucher type (`c_TipoDeComprobante`).
    InvoiceType: "invoice type" {
        Ingreso => "I",
        Egreso => "E",
        Pago => "P",
        Nomina => "N",
        Traslado => "T",
    }
}

catalog! {
    /// Federal tax attached to a product.
    TaxType: "tax type" {
        Iva => "IVA",
        Isr => "ISR",
        Ieps => "IEPS",
    }
}

catalog! {
    /// How a tax rate is applied (`c_TipoFactor`).
    TaxFactor: "tax factor" {
        Tasa => "Tasa",
        Cuota => "Cuota",
        Exento => "Exento",
    }
}

catalog! {
    /// How IEPS is presented on the invoice.
    IepsMode: "IEPS mode" {
        SumBeforeTaxes => "sum_before_taxes",
        BreakDown => "break_down",
        Unit => "unit",
    }
}

catalog! {
    /// Tax object classification of a product (`c_ObjetoImp`).
    Taxability: "taxability" {
        NoObjetoDeImpuesto => "01",
        SiObjetoDeImpuesto => "02",
        SiObjetoNoObligadoAlDesglose => "03",
        SiObjetoNoCausaImpuesto => "04",
        SiObjetoIvaCreditoPodebi => "05",
    }
}

catalog! {
    /// File representation offered by download endpoints.
    DownloadFormat: "download format" {
        Pdf => "pdf",
        Xml => "xml",
        Zip => "zip",
    }
}

#[cfg(test)]
mod tests {
    use super::{CancellationReason, InvoiceUse, PaymentForm, TaxSystem};
    use crate::ClientError;

    #[test]
    fn codes_parse_back_to_variants() {
        for form in PaymentForm::ALL {
            assert_eq!(form.as_str().parse::<PaymentForm>().ok(), Some(*form));
        }
        assert_eq!("616".parse::<TaxSystem>().ok(), Some(TaxSystem::SinObligacionesFiscales));
    }

    #[test]
    fn unknown_code_is_rejected() {
        let error = "07".parse::<PaymentForm>().expect_err("07 is not a payment form");
        match error {
            ClientError::InvalidCatalogCode { catalog, code } => {
                assert_eq!(catalog, "payment form");
                assert_eq!(code, "07");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn serializes_as_catalog_code() {
        let encoded = serde_json::to_string(&CancellationReason::ErrorsWithoutRelation)
            .expect("serializable");
        assert_eq!(encoded, "\"02\"");

        let decoded: InvoiceUse = serde_json::from_str("\"CP01\"").expect("valid code");
        assert_eq!(decoded, InvoiceUse::Pagos);
        assert!(serde_json::from_str::<InvoiceUse>("\"X99\"").is_err());
    }
}
