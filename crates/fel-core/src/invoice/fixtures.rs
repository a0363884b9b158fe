//! FEL documents shared by the unit tests.

/// A certified FACT with one good, one service and an IVA total.
pub const FACTURA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dte:GTDocumento xmlns:dte="http://www.sat.gob.gt/dte/fel/0.2.0" xmlns:ds="http://www.w3.org/2000/09/xmldsig#" Version="0.1">
  <dte:SAT ClaseDocumento="dte">
    <dte:DTE ID="DatosCertificados">
      <dte:DatosEmision ID="DatosEmision">
        <dte:DatosGenerales CodigoMoneda="GTQ" FechaHoraEmision="2024-03-07T10:15:30-06:00" Tipo="FACT"/>
        <dte:Emisor AfiliacionIVA="GEN" CodigoEstablecimiento="1" NITEmisor="12345678" NombreComercial="FERRETERIA EL MARTILLO" NombreEmisor="EL MARTILLO, SOCIEDAD ANONIMA">
          <dte:DireccionEmisor>
            <dte:Direccion>4A AVENIDA 12-30 ZONA 1</dte:Direccion>
            <dte:CodigoPostal>01001</dte:CodigoPostal>
            <dte:Municipio>GUATEMALA</dte:Municipio>
            <dte:Departamento>GUATEMALA</dte:Departamento>
            <dte:Pais>GT</dte:Pais>
          </dte:DireccionEmisor>
        </dte:Emisor>
        <dte:Receptor IDReceptor="87654321" NombreReceptor="JUAN PEREZ"/>
        <dte:Items>
          <dte:Item BienOServicio="B" NumeroLinea="1">
            <dte:Cantidad>2</dte:Cantidad>
            <dte:UnidadMedida>UNI</dte:UnidadMedida>
            <dte:Descripcion>MARTILLO DE ACERO 16 OZ</dte:Descripcion>
            <dte:PrecioUnitario>56.00</dte:PrecioUnitario>
            <dte:Precio>112.00</dte:Precio>
            <dte:Descuento>0.00</dte:Descuento>
            <dte:Impuestos>
              <dte:Impuesto>
                <dte:NombreCorto>IVA</dte:NombreCorto>
                <dte:CodigoUnidadGravable>1</dte:CodigoUnidadGravable>
                <dte:MontoGravable>100.00</dte:MontoGravable>
                <dte:MontoImpuesto>12.00</dte:MontoImpuesto>
              </dte:Impuesto>
            </dte:Impuestos>
            <dte:Total>112.00</dte:Total>
          </dte:Item>
          <dte:Item BienOServicio="S" NumeroLinea="2">
            <dte:Cantidad>1</dte:Cantidad>
            <dte:UnidadMedida>UNI</dte:UnidadMedida>
            <dte:Descripcion>INSTALACION</dte:Descripcion>
            <dte:PrecioUnitario>50.00</dte:PrecioUnitario>
            <dte:Precio>50.00</dte:Precio>
            <dte:Descuento>0.00</dte:Descuento>
            <dte:Impuestos>
              <dte:Impuesto>
                <dte:NombreCorto>IVA</dte:NombreCorto>
                <dte:CodigoUnidadGravable>1</dte:CodigoUnidadGravable>
                <dte:MontoGravable>44.64</dte:MontoGravable>
                <dte:MontoImpuesto>5.36</dte:MontoImpuesto>
              </dte:Impuesto>
            </dte:Impuestos>
            <dte:Total>50.00</dte:Total>
          </dte:Item>
        </dte:Items>
        <dte:Totales>
          <dte:TotalImpuestos>
            <dte:TotalImpuesto NombreCorto="IVA" TotalMontoImpuesto="17.36"/>
          </dte:TotalImpuestos>
          <dte:GranTotal>162.00</dte:GranTotal>
        </dte:Totales>
      </dte:DatosEmision>
      <dte:Certificacion>
        <dte:NITCertificador>16693949</dte:NITCertificador>
        <dte:NombreCertificador>SUPERINTENDENCIA DE ADMINISTRACION TRIBUTARIA</dte:NombreCertificador>
        <dte:NumeroAutorizacion Numero="2557891234" Serie="A1B2C3D4">A1B2C3D4-9860-4B12-8E4F-0A1B2C3D4E5F</dte:NumeroAutorizacion>
        <dte:FechaHoraCertificacion>2024-03-07T10:15:45-06:00</dte:FechaHoraCertificacion>
      </dte:Certificacion>
    </dte:DTE>
  </dte:SAT>
</dte:GTDocumento>
"#;

pub const GENERAL: &str =
    r#"<dte:DatosGenerales ID="FACT-0001" FechaHoraEmision="2024-01-15T08:00:00" Tipo="FCAM"/>"#;
pub const ISSUER: &str = r#"<dte:Emisor CodigoEstablecimiento="3" NITEmisor="5551234" NombreEmisor="DISTRIBUIDORA LA CEIBA"/>"#;
pub const RECEIVER: &str = r#"<dte:Receptor NombreReceptor="CONSUMIDOR FINAL"/>"#;

/// Wrap the given emission nodes in the usual document envelope.
pub fn document(parts: &[&str]) -> String {
    format!(
        r#"<dte:GTDocumento xmlns:dte="http://www.sat.gob.gt/dte/fel/0.2.0"><dte:SAT><dte:DTE><dte:DatosEmision>{}</dte:DatosEmision></dte:DTE></dte:SAT></dte:GTDocumento>"#,
        parts.concat()
    )
}

/// A complete `Item` node.
pub fn item(code: &str, quantity: &str, description: &str, price: &str, total: &str) -> String {
    format!(
        r#"<dte:Item BienOServicio="{code}"><dte:Cantidad>{quantity}</dte:Cantidad><dte:Descripcion>{description}</dte:Descripcion><dte:PrecioUnitario>{price}</dte:PrecioUnitario><dte:Total>{total}</dte:Total></dte:Item>"#
    )
}

/// `Items` wrapper around the given item nodes.
pub fn items(items: &[String]) -> String {
    format!("<dte:Items>{}</dte:Items>", items.concat())
}
